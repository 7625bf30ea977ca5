//! Issue update tool for MCP operations

use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{json, Map, Value};

/// Tool for editing an issue's fields
#[derive(Default)]
pub struct UpdateIssueTool;

impl UpdateIssueTool {
    /// Creates a new instance of the UpdateIssueTool
    pub fn new() -> Self {
        Self
    }

    /// PATCH body holding only the supplied fields
    fn patch_body(binder: &ParameterBinder<'_>) -> Result<Map<String, Value>> {
        let mut body = Map::new();
        for field in ["title", "body", "state"] {
            if let Some(value) = binder.optional_string_present(field)? {
                body.insert(field.into(), json!(value));
            }
        }
        for field in ["labels", "assignees"] {
            if let Some(values) = binder.optional_string_array_present(field)? {
                body.insert(field.into(), json!(values));
            }
        }
        if let Some(milestone) = binder.optional_int_present("milestone")? {
            body.insert("milestone".into(), json!(milestone));
        }
        Ok(body)
    }
}

#[async_trait]
impl McpTool for UpdateIssueTool {
    fn name(&self) -> &'static str {
        "update_issue"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            RepoRef::specs(),
            [
                ParameterSpec::integer("issue_number", "Issue number to update")
                    .required()
                    .with_minimum(1),
                ParameterSpec::string("title", "New title"),
                ParameterSpec::string("body", "New description"),
                ParameterSpec::string("state", "New state").one_of(&["open", "closed"]),
                ParameterSpec::string_array("labels", "New labels"),
                ParameterSpec::string_array("assignees", "New assignees"),
                ParameterSpec::integer("milestone", "New milestone number").with_minimum(1),
            ],
        )
    }

    fn mutating(&self) -> bool {
        true
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;
        let number = binder.require_int("issue_number")?.to_string();
        let body = Self::patch_body(&binder)?;

        tracing::debug!(
            "Updating {}/{}#{} fields {:?}",
            repo.owner,
            repo.repo,
            number,
            body.keys().collect::<Vec<_>>()
        );
        let request = RestRequest::patch(repo.segments(&["issues", number.as_str()]))
            .json(Value::Object(body));
        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}
