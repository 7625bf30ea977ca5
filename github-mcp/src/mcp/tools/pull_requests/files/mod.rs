//! Files changed by a pull request

use super::pull_number_spec;
use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;

/// Tool for `GET /repos/{owner}/{repo}/pulls/{number}/files`
#[derive(Default)]
pub struct GetPullRequestFilesTool;

impl GetPullRequestFilesTool {
    /// Creates a new instance of the GetPullRequestFilesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetPullRequestFilesTool {
    fn name(&self) -> &'static str {
        "get_pull_request_files"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            RepoRef::specs(),
            [pull_number_spec()].into_iter().chain(ParameterSpec::pagination()),
        )
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;
        let number = binder.require_int("pullNumber")?.to_string();

        let request = RestRequest::get(repo.segments(&["pulls", number.as_str(), "files"]))
            .paginate(binder.pagination()?);
        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}
