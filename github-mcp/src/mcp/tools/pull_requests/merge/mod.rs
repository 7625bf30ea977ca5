//! Pull request merging

use super::pull_number_spec;
use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{json, Map, Value};

/// Tool for `PUT /repos/{owner}/{repo}/pulls/{number}/merge`
#[derive(Default)]
pub struct MergePullRequestTool;

impl MergePullRequestTool {
    /// Creates a new instance of the MergePullRequestTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for MergePullRequestTool {
    fn name(&self) -> &'static str {
        "merge_pull_request"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            RepoRef::specs(),
            [
                pull_number_spec(),
                ParameterSpec::string("commit_title", "Title for merge commit"),
                ParameterSpec::string("commit_message", "Extra detail for merge commit"),
                ParameterSpec::string("merge_method", "Merge method")
                    .one_of(&["merge", "squash", "rebase"]),
            ],
        )
    }

    fn mutating(&self) -> bool {
        true
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;
        let number = binder.require_int("pullNumber")?.to_string();

        let mut body = Map::new();
        for field in ["commit_title", "commit_message", "merge_method"] {
            let value = binder.optional_string(field)?;
            if !value.is_empty() {
                body.insert(field.into(), json!(value));
            }
        }

        tracing::info!("Merging {}/{}#{}", repo.owner, repo.repo, number);
        let request = RestRequest::put(repo.segments(&["pulls", number.as_str(), "merge"]))
            .json(Value::Object(body));
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
    async fn test_merge_pull_request() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_rest(Ok(json!({ "merged": true, "sha": "abc123" })));
        let args = json!({
            "owner": "acme",
            "repo": "widgets",
            "pullNumber": 4,
            "merge_method": "squash"
        });

        let result = MergePullRequestTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap();

        assert_eq!(result_json(&result)["merged"], true);
        let request = &api.rest_requests()[0];
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path(), "/repos/acme/widgets/pulls/4/merge");
        assert_eq!(request.body, Some(json!({ "merge_method": "squash" })));
    }
}
