//! Combined commit status of a pull request's head

use super::pull_number_spec;
use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::{GitHubMcpError, Result};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::Value;

/// Tool reading `GET /repos/{owner}/{repo}/commits/{sha}/status` for the head commit
#[derive(Default)]
pub struct GetPullRequestStatusTool;

impl GetPullRequestStatusTool {
    /// Creates a new instance of the GetPullRequestStatusTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetPullRequestStatusTool {
    fn name(&self) -> &'static str {
        "get_pull_request_status"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(RepoRef::specs(), [pull_number_spec()])
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;
        let number = binder.require_int("pullNumber")?.to_string();

        let pull = context
            .rest(RestRequest::get(repo.segments(&["pulls", number.as_str()])))
            .await?;
        let sha = pull
            .body
            .pointer("/head/sha")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                GitHubMcpError::upstream(format!("pull request #{number} has no head commit"))
            })?;

        tracing::debug!("Status of {}/{}#{} at {}", repo.owner, repo.repo, number, sha);
        let response = context
            .rest(RestRequest::get(repo.segments(&["commits", sha, "status"])))
            .await?;
        BaseToolImpl::json_response(&response.body)
    }
}
