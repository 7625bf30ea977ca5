//! Project item deletion

use super::project_id_spec;
use crate::client::GraphQlRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::mutation_payload;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::json;

const DELETE_ITEM_MUTATION: &str = r#"mutation($input: DeleteProjectV2ItemInput!) {
  deleteProjectV2Item(input: $input) { deletedItemId }
}"#;

/// Tool for `deleteProjectV2Item`
#[derive(Default)]
pub struct DeleteProjectItemTool;

impl DeleteProjectItemTool {
    /// Creates a new instance of the DeleteProjectItemTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for DeleteProjectItemTool {
    fn name(&self) -> &'static str {
        "delete_project_v2_item"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            project_id_spec(),
            ParameterSpec::string("item_id", "Project item node ID").required(),
        ]
    }

    fn mutating(&self) -> bool {
        true
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let input = json!({
            "projectId": binder.require_string("project_id")?,
            "itemId": binder.require_string("item_id")?,
        });

        let response = context
            .graphql(GraphQlRequest::new(DELETE_ITEM_MUTATION, json!({ "input": input })))
            .await?;
        let deleted = mutation_payload(response, &["deleteProjectV2Item", "deletedItemId"])?;
        BaseToolImpl::json_response(&json!({ "deletedItemId": deleted }))
    }
}
