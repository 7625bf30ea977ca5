//! Pull request editing

use super::pull_number_spec;
use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{json, Map, Value};

/// Tool for `PATCH /repos/{owner}/{repo}/pulls/{number}`
#[derive(Default)]
pub struct UpdatePullRequestTool;

impl UpdatePullRequestTool {
    /// Creates a new instance of the UpdatePullRequestTool
    pub fn new() -> Self {
        Self
    }

    fn patch_body(binder: &ParameterBinder<'_>) -> Result<Map<String, Value>> {
        let mut body = Map::new();
        for field in ["title", "body", "state", "base"] {
            if let Some(value) = binder.optional_string_present(field)? {
                body.insert(field.into(), json!(value));
            }
        }
        if let Some(allowed) = binder.optional_bool_present("maintainer_can_modify")? {
            body.insert("maintainer_can_modify".into(), json!(allowed));
        }
        Ok(body)
    }
}

#[async_trait]
impl McpTool for UpdatePullRequestTool {
    fn name(&self) -> &'static str {
        "update_pull_request"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            RepoRef::specs(),
            [
                pull_number_spec(),
                ParameterSpec::string("title", "New title"),
                ParameterSpec::string("body", "New description"),
                ParameterSpec::string("state", "New state").one_of(&["open", "closed"]),
                ParameterSpec::string("base", "New base branch name"),
                ParameterSpec::boolean(
                    "maintainer_can_modify",
                    "Allow maintainer edits",
                ),
            ],
        )
    }

    fn mutating(&self) -> bool {
        true
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;
        let number = binder.require_int("pullNumber")?.to_string();
        let body = Self::patch_body(&binder)?;

        tracing::debug!(
            "Updating {}/{}#{} fields {:?}",
            repo.owner,
            repo.repo,
            number,
            body.keys().collect::<Vec<_>>()
        );
        let request = RestRequest::patch(repo.segments(&["pulls", number.as_str()]))
            .json(Value::Object(body));
        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}
