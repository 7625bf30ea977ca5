//! Issue comment listing

use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;

/// Tool for listing the comments on an issue
#[derive(Default)]
pub struct GetIssueCommentsTool;

impl GetIssueCommentsTool {
    /// Creates a new instance of the GetIssueCommentsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetIssueCommentsTool {
    fn name(&self) -> &'static str {
        "get_issue_comments"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        let mut parameters = specs(
            RepoRef::specs(),
            [ParameterSpec::integer("issue_number", "Issue number")
                .required()
                .with_minimum(1)],
        );
        parameters.extend(ParameterSpec::pagination());
        parameters
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;
        let number = binder.require_int("issue_number")?.to_string();

        let request = RestRequest::get(repo.segments(&["issues", number.as_str(), "comments"]))
            .paginate(binder.pagination()?);
        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}
