//! Project item field updates

use super::project_id_spec;
use crate::client::GraphQlRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterKind, ParameterSpec, ValidationError};
use crate::mcp::shared_utils::mutation_payload;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rmcp::model::CallToolResult;
use serde_json::{json, Value};

const UPDATE_ITEM_MUTATION: &str = r#"mutation($input: UpdateProjectV2ItemFieldValueInput!) {
  updateProjectV2ItemFieldValue(input: $input) { projectV2Item { id } }
}"#;

const VALUE_TYPES: &[&str] = &["text", "number", "date", "single_select", "iteration"];

/// Build the `ProjectV2FieldValue` input for `value` read as `value_type`
fn field_value(value_type: &str, value: &str) -> std::result::Result<Value, ValidationError> {
    let invalid = |reason: String| ValidationError::Invalid {
        parameter: "value".to_string(),
        expected: ParameterKind::String,
        reason,
    };

    match value_type {
        "" | "text" => Ok(json!({ "text": value })),
        "number" => value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .map(|number| json!({ "number": number }))
            .ok_or_else(|| invalid(format!("'{value}' is not a number"))),
        "date" => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map(|_| json!({ "date": value.trim() }))
            .map_err(|_| invalid(format!("'{value}' is not a date (YYYY-MM-DD)"))),
        "single_select" => Ok(json!({ "singleSelectOptionId": value })),
        "iteration" => Ok(json!({ "iterationId": value })),
        other => Err(ValidationError::Invalid {
            parameter: "value_type".to_string(),
            expected: ParameterKind::String,
            reason: format!("must be one of {}, got '{other}'", VALUE_TYPES.join(", ")),
        }),
    }
}

/// Tool for `updateProjectV2ItemFieldValue`
#[derive(Default)]
pub struct UpdateProjectItemTool;

impl UpdateProjectItemTool {
    /// Creates a new instance of the UpdateProjectItemTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for UpdateProjectItemTool {
    fn name(&self) -> &'static str {
        "update_project_v2_item"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            project_id_spec(),
            ParameterSpec::string("item_id", "Project item node ID").required(),
            ParameterSpec::string("field_id", "Field node ID").required(),
            ParameterSpec::string("value", "New value, interpreted according to value_type")
                .required(),
            ParameterSpec::string("value_type", "How to interpret value")
                .one_of(VALUE_TYPES)
                .with_default("text"),
        ]
    }

    fn mutating(&self) -> bool {
        true
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let project_id = binder.require_string("project_id")?;
        let item_id = binder.require_string("item_id")?;
        let field_id = binder.require_string("field_id")?;
        let value = field_value(
            &binder.optional_string("value_type")?,
            &binder.require_string("value")?,
        )?;

        let input = json!({
            "projectId": project_id,
            "itemId": item_id,
            "fieldId": field_id,
            "value": value,
        });
        let response = context
            .graphql(GraphQlRequest::new(UPDATE_ITEM_MUTATION, json!({ "input": input })))
            .await?;
        let item = mutation_payload(response, &["updateProjectV2ItemFieldValue", "projectV2Item"])?;
        BaseToolImpl::json_response(&item)
    }
}
