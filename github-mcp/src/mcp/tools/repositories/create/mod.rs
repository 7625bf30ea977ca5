//! Repository creation

use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::json;

/// Tool for `POST /user/repos`
#[derive(Default)]
pub struct CreateRepositoryTool;

impl CreateRepositoryTool {
    /// Creates a new instance of the CreateRepositoryTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateRepositoryTool {
    fn name(&self) -> &'static str {
        "create_repository"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::string("name", "Repository name").required(),
            ParameterSpec::string("description", "Repository description"),
            ParameterSpec::boolean("private", "Whether repo should be private"),
            ParameterSpec::boolean("autoInit", "Initialize with README"),
        ]
    }

    fn mutating(&self) -> bool {
        true
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let name = binder.require_string("name")?;

        let body = json!({
            "name": name,
            "description": binder.optional_string("description")?,
            "private": binder.optional_bool("private")?,
            "auto_init": binder.optional_bool("autoInit")?,
        });

        tracing::info!("Creating repository {}", name);
        let response = context
            .rest(RestRequest::post(["user", "repos"]).json(body))
            .await?;
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
    async fn test_create_private_repository() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_rest(Ok(json!({ "full_name": "octocat/gadgets", "private": true })));
        let args = json!({ "name": "gadgets", "private": true, "autoInit": true });

        let result = CreateRepositoryTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap();

        assert_eq!(result_json(&result)["full_name"], "octocat/gadgets");
        let request = &api.rest_requests()[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path(), "/user/repos");
        assert_eq!(
            request.body,
            Some(json!({
                "name": "gadgets",
                "description": "",
                "private": true,
                "auto_init": true
            }))
        );
    }
}
