//! Profile of the authenticated user

use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterSpec};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;

/// Tool returning `GET /user`
#[derive(Default)]
pub struct GetMeTool;

impl GetMeTool {
    /// Creates a new instance of the GetMeTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetMeTool {
    fn name(&self) -> &'static str {
        "get_me"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![ParameterSpec::string(
            "reason",
            "Optional: why the profile is being requested",
        )]
    }

    async fn execute(&self, _arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let response = context.rest(RestRequest::get(["user"])).await?;
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
    async fn test_get_me_returns_profile() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_rest(Ok(json!({ "login": "octocat", "id": 1 })));
        let context = test_context(api.clone());

        let result = GetMeTool::new()
            .execute(&Arguments::new(), &context)
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(false));
        assert_eq!(result_json(&result)["login"], "octocat");
        assert_eq!(api.rest_requests()[0].path(), "/user");
    }
}
