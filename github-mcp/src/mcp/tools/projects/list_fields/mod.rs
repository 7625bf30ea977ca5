//! Project field listing

use super::{first_spec, project_id_spec, project_node_not_found};
use crate::client::GraphQlRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::graphql_field;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::json;

const FIELDS_QUERY: &str = r#"query($projectId: ID!, $first: Int!) {
  node(id: $projectId) {
    ... on ProjectV2 {
      fields(first: $first) {
        nodes {
          ... on ProjectV2FieldCommon { id name dataType }
          ... on ProjectV2SingleSelectField { options { id name } }
          ... on ProjectV2IterationField {
            configuration { iterations { id title startDate duration } }
          }
        }
      }
    }
  }
}"#;

/// Tool for listing a project's fields
#[derive(Default)]
pub struct ListProjectFieldsTool;

impl ListProjectFieldsTool {
    /// Creates a new instance of the ListProjectFieldsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListProjectFieldsTool {
    fn name(&self) -> &'static str {
        "list_project_v2_fields"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![project_id_spec(), first_spec("Number of fields to return", 50)]
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let project_id = binder.require_string("project_id")?;
        let first = binder.optional_int_with_default("first", 50)?;

        let request = GraphQlRequest::new(
            FIELDS_QUERY,
            json!({ "projectId": project_id, "first": first }),
        );
        let data = context.graphql(request).await?.into_body();

        let fields = graphql_field(&data, &["node", "fields", "nodes"])
            .ok_or_else(|| project_node_not_found(&project_id))?;
        BaseToolImpl::json_response(fields)
    }
}
