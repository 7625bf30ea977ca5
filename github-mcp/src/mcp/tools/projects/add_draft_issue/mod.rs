//! Draft issue creation inside a project

use super::project_id_spec;
use crate::client::GraphQlRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::mutation_payload;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{json, Map, Value};

const ADD_DRAFT_MUTATION: &str = r#"mutation($input: AddProjectV2DraftIssueInput!) {
  addProjectV2DraftIssue(input: $input) { projectItem { id } }
}"#;

/// Tool for `addProjectV2DraftIssue`
#[derive(Default)]
pub struct AddDraftIssueTool;

impl AddDraftIssueTool {
    /// Creates a new instance of the AddDraftIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AddDraftIssueTool {
    fn name(&self) -> &'static str {
        "add_project_v2_draft_issue"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            project_id_spec(),
            ParameterSpec::string("title", "Draft issue title").required(),
            ParameterSpec::string("body", "Draft issue body"),
        ]
    }

    fn mutating(&self) -> bool {
        true
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let mut input = Map::new();
        input.insert("projectId".into(), json!(binder.require_string("project_id")?));
        input.insert("title".into(), json!(binder.require_string("title")?));
        if let Some(body) = binder.optional_string_present("body")? {
            input.insert("body".into(), json!(body));
        }

        let request =
            GraphQlRequest::new(ADD_DRAFT_MUTATION, json!({ "input": Value::Object(input) }));
        let item = mutation_payload(
            context.graphql(request).await?,
            &["addProjectV2DraftIssue", "projectItem"],
        )?;
        BaseToolImpl::json_response(&item)
    }
}
