//! Single issue lookup

use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;

/// Tool for fetching one issue
#[derive(Default)]
pub struct GetIssueTool;

impl GetIssueTool {
    /// Creates a new instance of the GetIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetIssueTool {
    fn name(&self) -> &'static str {
        "get_issue"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            RepoRef::specs(),
            [ParameterSpec::integer("issue_number", "The number of the issue")
                .required()
                .with_minimum(1)],
        )
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;
        let number = binder.require_int("issue_number")?.to_string();

        let response = context
            .rest(RestRequest::get(repo.segments(&["issues", number.as_str()])))
            .await?;
        BaseToolImpl::json_response(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{result_json, test_context, MockGitHubApi};
    use crate::GitHubMcpError;
    use serde_json::json;
    use std::sync::Arc;

    fn args(value: serde_json::Value) -> Arguments {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_get_issue() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_rest(Ok(json!({ "number": 7, "title": "Broken build" })));

        let result = GetIssueTool::new()
            .execute(
                &args(json!({ "owner": "acme", "repo": "widgets", "issue_number": 7 })),
                &test_context(api.clone()),
            )
            .await
            .unwrap();

        assert_eq!(result_json(&result)["title"], "Broken build");
        assert_eq!(api.rest_requests()[0].path(), "/repos/acme/widgets/issues/7");
    }

    #[tokio::test]
    async fn test_get_issue_missing_number_makes_no_call() {
        let api = Arc::new(MockGitHubApi::new());

        let err = GetIssueTool::new()
            .execute(
                &args(json!({ "owner": "acme", "repo": "widgets" })),
                &test_context(api.clone()),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, GitHubMcpError::Validation(_)));
        assert!(api.rest_requests().is_empty());
    }
}
