//! Reviews submitted on a pull request

use super::pull_number_spec;
use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;

/// Tool for `GET /repos/{owner}/{repo}/pulls/{number}/reviews`
#[derive(Default)]
pub struct GetPullRequestReviewsTool;

impl GetPullRequestReviewsTool {
    /// Creates a new instance of the GetPullRequestReviewsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetPullRequestReviewsTool {
    fn name(&self) -> &'static str {
        "get_pull_request_reviews"
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

        let request = RestRequest::get(repo.segments(&["pulls", number.as_str(), "reviews"]))
            .paginate(binder.pagination()?);
        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{result_json, test_context, MockGitHubApi};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_reviews_for_pull_request() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_rest(Ok(json!([{ "id": 80, "state": "APPROVED" }])));
        let args = json!({ "owner": "acme", "repo": "widgets", "pullNumber": 3 });

        let result = GetPullRequestReviewsTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap();

        assert_eq!(result_json(&result)[0]["state"], "APPROVED");
        assert_eq!(api.rest_requests()[0].path(), "/repos/acme/widgets/pulls/3/reviews");
    }

    #[tokio::test]
    async fn test_pull_number_is_required() {
        let api = Arc::new(MockGitHubApi::new());
        let args = json!({ "owner": "acme", "repo": "widgets" });

        let err = GetPullRequestReviewsTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("pullNumber"));
        assert!(api.rest_requests().is_empty());
    }
}
