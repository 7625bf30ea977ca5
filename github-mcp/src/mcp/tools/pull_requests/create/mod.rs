//! Pull request creation

use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{json, Map, Value};

/// Tool for opening a pull request
#[derive(Default)]
pub struct CreatePullRequestTool;

impl CreatePullRequestTool {
    /// Creates a new instance of the CreatePullRequestTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreatePullRequestTool {
    fn name(&self) -> &'static str {
        "create_pull_request"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            RepoRef::specs(),
            [
                ParameterSpec::string("title", "PR title").required(),
                ParameterSpec::string("head", "Branch containing changes").required(),
                ParameterSpec::string("base", "Branch to merge into").required(),
                ParameterSpec::string("body", "PR description"),
                ParameterSpec::boolean("draft", "Create as draft PR"),
                ParameterSpec::boolean("maintainer_can_modify", "Allow maintainer edits"),
            ],
        )
    }

    fn mutating(&self) -> bool {
        true
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;

        let mut body = Map::new();
        for field in ["title", "head", "base"] {
            body.insert(field.into(), json!(binder.require_string(field)?));
        }
        body.insert("body".into(), json!(binder.optional_string("body")?));
        body.insert("draft".into(), json!(binder.optional_bool("draft")?));
        if let Some(allow) = binder.optional_bool_present("maintainer_can_modify")? {
            body.insert("maintainer_can_modify".into(), json!(allow));
        }

        let response = context
            .rest(RestRequest::post(repo.segments(&["pulls"])).json(Value::Object(body)))
            .await?;
        BaseToolImpl::json_response(&response.body)
    }
}
