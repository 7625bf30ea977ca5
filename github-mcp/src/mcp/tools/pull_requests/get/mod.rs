//! Single pull request lookup

use super::pull_number_spec;
use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;

/// Tool for fetching one pull request
#[derive(Default)]
pub struct GetPullRequestTool;

impl GetPullRequestTool {
    /// Creates a new instance of the GetPullRequestTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetPullRequestTool {
    fn name(&self) -> &'static str {
        "get_pull_request"
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

        let response = context
            .rest(RestRequest::get(repo.segments(&["pulls", number.as_str()])))
            .await?;
        BaseToolImpl::json_response(&response.body)
    }
}
