//! Branch creation

use super::{branch_head, string_at};
use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{path_segments, specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::json;

/// Tool creating `refs/heads/{branch}` through the git data API
#[derive(Default)]
pub struct CreateBranchTool;

impl CreateBranchTool {
    /// Creates a new instance of the CreateBranchTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateBranchTool {
    fn name(&self) -> &'static str {
        "create_branch"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            RepoRef::specs(),
            [
                ParameterSpec::string("branch", "Name for new branch").required(),
                ParameterSpec::string("from_branch", "Source branch (defaults to repo default)"),
            ],
        )
    }

    fn mutating(&self) -> bool {
        true
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;
        let branch = binder.require_string("branch")?;
        let new_ref = format!("refs/heads/{}", path_segments("branch", &branch)?.join("/"));

        let mut from = binder.optional_string("from_branch")?;
        if from.is_empty() {
            let response = context.rest(RestRequest::get(repo.segments(&[]))).await?;
            from = string_at(&response.body, "/default_branch", || {
                format!("{}/{} has no default branch", repo.owner, repo.repo)
            })?;
        }
        let sha = branch_head(context, &repo, &from).await?;

        tracing::info!("Creating {} in {}/{} at {}", new_ref, repo.owner, repo.repo, sha);
        let request = RestRequest::post(repo.segments(&["git", "refs"]))
            .json(json!({ "ref": new_ref, "sha": sha }));
        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{result_json, test_context, MockGitHubApi};
    use reqwest::Method;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_branch_from_default_branch() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_rest(Ok(json!({ "default_branch": "main" })));
        api.push_rest(Ok(json!({ "ref": "refs/heads/main", "object": { "sha": "aa218f5" } })));
        api.push_rest(Ok(json!({ "ref": "refs/heads/feature/login", "object": { "sha": "aa218f5" } })));
        let args = json!({ "owner": "acme", "repo": "widgets", "branch": "feature/login" });

        let result = CreateBranchTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap();

        assert_eq!(result_json(&result)["ref"], "refs/heads/feature/login");
        let requests = api.rest_requests();
        assert_eq!(requests[0].path(), "/repos/acme/widgets");
        assert_eq!(requests[1].path(), "/repos/acme/widgets/git/ref/heads/main");
        assert_eq!(requests[2].method, Method::POST);
        assert_eq!(requests[2].path(), "/repos/acme/widgets/git/refs");
        assert_eq!(
            requests[2].body,
            Some(json!({ "ref": "refs/heads/feature/login", "sha": "aa218f5" }))
        );
    }

    #[tokio::test]
    async fn test_branch_from_named_branch_skips_repository_lookup() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_rest(Ok(json!({ "object": { "sha": "b3c1" } })));
        api.push_rest(Ok(json!({ "ref": "refs/heads/hotfix" })));
        let args = json!({
            "owner": "acme",
            "repo": "widgets",
            "branch": "hotfix",
            "from_branch": "release/2.x"
        });

        CreateBranchTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap();

        let requests = api.rest_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0].segments,
            vec!["repos", "acme", "widgets", "git", "ref", "heads", "release", "2.x"]
        );
        assert_eq!(requests[1].body, Some(json!({ "ref": "refs/heads/hotfix", "sha": "b3c1" })));
    }

    #[tokio::test]
    async fn test_missing_head_sha_is_upstream_error() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_rest(Ok(json!({ "object": {} })));
        let args = json!({
            "owner": "acme",
            "repo": "widgets",
            "branch": "hotfix",
            "from_branch": "main"
        });

        let err = CreateBranchTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("branch main has no head commit"));
        assert_eq!(api.rest_requests().len(), 1);
    }
}
