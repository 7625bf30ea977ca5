//! Bringing a pull request branch up to date with its base

use super::pull_number_spec;
use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{json, Map, Value};

/// Tool for `PUT /repos/{owner}/{repo}/pulls/{number}/update-branch`
#[derive(Default)]
pub struct UpdatePullRequestBranchTool;

impl UpdatePullRequestBranchTool {
    /// Creates a new instance of the UpdatePullRequestBranchTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for UpdatePullRequestBranchTool {
    fn name(&self) -> &'static str {
        "update_pull_request_branch"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            RepoRef::specs(),
            [
                pull_number_spec(),
                ParameterSpec::string(
                    "expectedHeadSha",
                    "The expected SHA of the pull request's HEAD ref",
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

        let mut body = Map::new();
        let expected = binder.optional_string("expectedHeadSha")?;
        if !expected.is_empty() {
            body.insert("expected_head_sha".into(), json!(expected));
        }

        tracing::info!("Updating branch of {}/{}#{}", repo.owner, repo.repo, number);
        let request =
            RestRequest::put(repo.segments(&["pulls", number.as_str(), "update-branch"]))
                .json(Value::Object(body));
        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}
