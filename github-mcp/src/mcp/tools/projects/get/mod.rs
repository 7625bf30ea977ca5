//! Project lookup by owner and number

use super::ProjectV2;
use crate::client::GraphQlRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::graphql_field;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::{GitHubMcpError, Result};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::json;

const PROJECT_QUERY: &str = r#"query($owner: String!, $number: Int!) {
  repositoryOwner(login: $owner) {
    ... on ProjectV2Owner {
      projectV2(number: $number) {
        id number title shortDescription public closed url createdAt updatedAt
      }
    }
  }
}"#;

/// Tool for fetching one project
#[derive(Default)]
pub struct GetProjectTool;

impl GetProjectTool {
    /// Creates a new instance of the GetProjectTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetProjectTool {
    fn name(&self) -> &'static str {
        "get_project_v2"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::string("owner", "User or organization login owning the project")
                .required(),
            ParameterSpec::integer("number", "Project number")
                .required()
                .with_bounds(1, i32::MAX as i64),
        ]
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let owner = binder.require_string("owner")?;
        let number = binder.require_int("number")?;
        let not_found =
            || GitHubMcpError::NotFound(format!("project {number} not found for owner {owner}"));

        let request = GraphQlRequest::new(PROJECT_QUERY, json!({ "owner": owner, "number": number }));
        let data = match context.graphql(request).await {
            Ok(response) => response.into_body(),
            Err(GitHubMcpError::NotFound(detail)) => {
                tracing::debug!("Project lookup failed: {}", detail);
                return Err(not_found());
            }
            Err(error) => return Err(error),
        };

        let project = graphql_field(&data, &["repositoryOwner", "projectV2"])
            .cloned()
            .ok_or_else(not_found)?;
        BaseToolImpl::json_response(&ProjectV2::from_value(project)?)
    }
}
