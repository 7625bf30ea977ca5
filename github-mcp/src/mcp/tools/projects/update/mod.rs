//! Project settings update

use super::{project_id_spec, ProjectV2};
use crate::client::GraphQlRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::mutation_payload;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{json, Map, Value};

const UPDATE_MUTATION: &str = r#"mutation($input: UpdateProjectV2Input!) {
  updateProjectV2(input: $input) {
    projectV2 { id number title shortDescription public closed url createdAt updatedAt }
  }
}"#;

/// Tool for `updateProjectV2`
#[derive(Default)]
pub struct UpdateProjectTool;

impl UpdateProjectTool {
    /// Creates a new instance of the UpdateProjectTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for UpdateProjectTool {
    fn name(&self) -> &'static str {
        "update_project_v2"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            project_id_spec(),
            ParameterSpec::string("title", "New title"),
            ParameterSpec::string("description", "New short description"),
            ParameterSpec::string("readme", "New readme, in Markdown"),
            ParameterSpec::boolean("public", "Whether the project is public"),
            ParameterSpec::boolean("closed", "Whether the project is closed"),
        ]
    }

    fn mutating(&self) -> bool {
        true
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let mut input = Map::new();
        input.insert("projectId".into(), json!(binder.require_string("project_id")?));

        for (parameter, field) in [
            ("title", "title"),
            ("description", "shortDescription"),
            ("readme", "readme"),
        ] {
            if let Some(value) = binder.optional_string_present(parameter)? {
                input.insert(field.into(), json!(value));
            }
        }
        for field in ["public", "closed"] {
            if let Some(value) = binder.optional_bool_present(field)? {
                input.insert(field.into(), json!(value));
            }
        }

        let request = GraphQlRequest::new(UPDATE_MUTATION, json!({ "input": Value::Object(input) }));
        let updated = mutation_payload(
            context.graphql(request).await?,
            &["updateProjectV2", "projectV2"],
        )?;
        BaseToolImpl::json_response(&ProjectV2::from_value(updated)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{result_json, test_context, MockGitHubApi};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_close_project_sends_only_closed() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_graphql(Ok(json!({ "updateProjectV2": { "projectV2": {
            "id": "PVT_1", "number": 1, "title": "Roadmap", "closed": true,
            "url": "https://github.com/users/octocat/projects/1"
        } } })));

        let args = json!({ "project_id": "PVT_1", "closed": true });
        let result = UpdateProjectTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap();

        assert_eq!(result_json(&result)["closed"], true);
        assert_eq!(
            api.graphql_requests()[0].variables,
            json!({ "input": { "projectId": "PVT_1", "closed": true } })
        );
    }
}
