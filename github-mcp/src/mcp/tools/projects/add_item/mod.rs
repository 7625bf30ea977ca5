//! Adding issues and pull requests to a project

use super::project_id_spec;
use crate::client::GraphQlRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::mutation_payload;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::json;

const ADD_ITEM_MUTATION: &str = r#"mutation($input: AddProjectV2ItemByIdInput!) {
  addProjectV2ItemById(input: $input) { item { id } }
}"#;

/// Tool for `addProjectV2ItemById`
#[derive(Default)]
pub struct AddProjectItemTool;

impl AddProjectItemTool {
    /// Creates a new instance of the AddProjectItemTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AddProjectItemTool {
    fn name(&self) -> &'static str {
        "add_project_v2_item"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            project_id_spec(),
            ParameterSpec::string("content_id", "Issue or pull request node ID").required(),
        ]
    }

    fn mutating(&self) -> bool {
        true
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let input = json!({
            "projectId": binder.require_string("project_id")?,
            "contentId": binder.require_string("content_id")?,
        });

        let response = context
            .graphql(GraphQlRequest::new(ADD_ITEM_MUTATION, json!({ "input": input })))
            .await?;
        let item = mutation_payload(response, &["addProjectV2ItemById", "item"])?;
        BaseToolImpl::json_response(&item)
    }
}
