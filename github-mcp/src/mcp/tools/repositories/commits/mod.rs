//! Commit history listing

use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;

/// Tool for `GET /repos/{owner}/{repo}/commits`
#[derive(Default)]
pub struct ListCommitsTool;

impl ListCommitsTool {
    /// Creates a new instance of the ListCommitsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListCommitsTool {
    fn name(&self) -> &'static str {
        "list_commits"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        let mut parameters = specs(
            RepoRef::specs(),
            [ParameterSpec::string("sha", "Branch name or commit SHA to start from")],
        );
        parameters.extend(ParameterSpec::pagination());
        parameters
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;

        let request = RestRequest::get(repo.segments(&["commits"]))
            .query_non_empty("sha", &binder.optional_string("sha")?)
            .paginate(binder.pagination()?);
        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}
