//! Issue comment creation

use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::json;

/// Tool for commenting on an issue
#[derive(Default)]
pub struct AddIssueCommentTool;

impl AddIssueCommentTool {
    /// Creates a new instance of the AddIssueCommentTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AddIssueCommentTool {
    fn name(&self) -> &'static str {
        "add_issue_comment"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            RepoRef::specs(),
            [
                ParameterSpec::integer("issue_number", "Issue number to comment on")
                    .required()
                    .with_minimum(1),
                ParameterSpec::string("body", "Comment content").required(),
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
        let body = binder.require_string("body")?;

        let request = RestRequest::post(repo.segments(&["issues", number.as_str(), "comments"]))
            .json(json!({ "body": body }));
        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_context, MockGitHubApi};
    use crate::GitHubMcpError;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_empty_body_is_rejected() {
        let api = Arc::new(MockGitHubApi::new());
        let args = json!({ "owner": "acme", "repo": "widgets", "issue_number": 3, "body": "" });

        let err = AddIssueCommentTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap_err();

        assert!(matches!(err, GitHubMcpError::Validation(_)));
        assert_eq!(err.to_string(), "missing required parameter: body");
        assert!(api.rest_requests().is_empty());
    }
}
