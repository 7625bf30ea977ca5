//! Repository pull request listing

use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;

/// Tool for listing a repository's pull requests
#[derive(Default)]
pub struct ListPullRequestsTool;

impl ListPullRequestsTool {
    /// Creates a new instance of the ListPullRequestsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListPullRequestsTool {
    fn name(&self) -> &'static str {
        "list_pull_requests"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        let mut parameters = specs(
            RepoRef::specs(),
            [
                ParameterSpec::string("state", "Filter by state").one_of(&["open", "closed", "all"]),
                ParameterSpec::string("head", "Filter by head user/org and branch"),
                ParameterSpec::string("base", "Filter by base branch"),
                ParameterSpec::string("sort", "Sort by")
                    .one_of(&["created", "updated", "popularity", "long-running"]),
                ParameterSpec::string("direction", "Sort direction").one_of(&["asc", "desc"]),
            ],
        );
        parameters.extend(ParameterSpec::pagination());
        parameters
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;

        let mut request = RestRequest::get(repo.segments(&["pulls"]));
        for key in ["state", "head", "base", "sort", "direction"] {
            request = request.query_non_empty(key, &binder.optional_string(key)?);
        }
        let request = request.paginate(binder.pagination()?);

        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}
