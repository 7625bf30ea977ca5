//! Project item listing

use super::{first_spec, project_id_spec, project_node_not_found};
use crate::client::GraphQlRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::graphql_field;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{json, Value};

const ITEMS_QUERY: &str = r#"query($projectId: ID!, $first: Int!, $after: String) {
  node(id: $projectId) {
    ... on ProjectV2 {
      items(first: $first, after: $after) {
        pageInfo { hasNextPage endCursor }
        nodes {
          id
          type
          isArchived
          content {
            ... on Issue { title number url state }
            ... on PullRequest { title number url state }
            ... on DraftIssue { title body }
          }
          fieldValues(first: 20) {
            nodes {
              ... on ProjectV2ItemFieldTextValue { text field { ... on ProjectV2FieldCommon { name } } }
              ... on ProjectV2ItemFieldNumberValue { number field { ... on ProjectV2FieldCommon { name } } }
              ... on ProjectV2ItemFieldDateValue { date field { ... on ProjectV2FieldCommon { name } } }
              ... on ProjectV2ItemFieldSingleSelectValue { name field { ... on ProjectV2FieldCommon { name } } }
              ... on ProjectV2ItemFieldIterationValue { title field { ... on ProjectV2FieldCommon { name } } }
            }
          }
        }
      }
    }
  }
}"#;

/// Tool for listing a project's items
#[derive(Default)]
pub struct ListProjectItemsTool;

impl ListProjectItemsTool {
    /// Creates a new instance of the ListProjectItemsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListProjectItemsTool {
    fn name(&self) -> &'static str {
        "list_project_v2_items"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            project_id_spec(),
            first_spec("Number of items to return", 30),
            ParameterSpec::string("after", "Cursor from a previous page's pageInfo.endCursor"),
        ]
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let project_id = binder.require_string("project_id")?;
        let first = binder.optional_int_with_default("first", 30)?;
        let after = binder
            .optional_string_present("after")?
            .filter(|cursor| !cursor.is_empty());

        let request = GraphQlRequest::new(
            ITEMS_QUERY,
            json!({ "projectId": project_id, "first": first, "after": after }),
        );
        let data = context.graphql(request).await?.into_body();

        let items = graphql_field(&data, &["node", "items"])
            .ok_or_else(|| project_node_not_found(&project_id))?;
        BaseToolImpl::json_response(&json!({
            "items": items.get("nodes").cloned().unwrap_or_else(|| json!([])),
            "pageInfo": items.get("pageInfo").cloned().unwrap_or(Value::Null),
        }))
    }
}
