//! Repository forking

use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{json, Map, Value};

/// Tool for `POST /repos/{owner}/{repo}/forks`
#[derive(Default)]
pub struct ForkRepositoryTool;

impl ForkRepositoryTool {
    /// Creates a new instance of the ForkRepositoryTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ForkRepositoryTool {
    fn name(&self) -> &'static str {
        "fork_repository"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            RepoRef::specs(),
            [ParameterSpec::string("organization", "Organization to fork to")],
        )
    }

    fn mutating(&self) -> bool {
        true
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;

        let mut body = Map::new();
        let organization = binder.optional_string("organization")?;
        if !organization.is_empty() {
            body.insert("organization".into(), json!(organization));
        }

        tracing::info!("Forking {}/{}", repo.owner, repo.repo);
        let request = RestRequest::post(repo.segments(&["forks"])).json(Value::Object(body));
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
    async fn test_fork_into_organization() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_rest(Ok(json!({ "full_name": "tooling/widgets", "fork": true })));
        let args = json!({ "owner": "acme", "repo": "widgets", "organization": "tooling" });

        let result = ForkRepositoryTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap();

        assert_eq!(result_json(&result)["fork"], true);
        let request = &api.rest_requests()[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path(), "/repos/acme/widgets/forks");
        assert_eq!(request.body, Some(json!({ "organization": "tooling" })));
    }
}
