//! Project creation tool for MCP operations

use super::ProjectV2;
use crate::client::GraphQlRequest;
use crate::identity::AccountIdentity;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::mutation_payload;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde::Serialize;
use serde_json::{json, Map, Value};

const CREATE_MUTATION: &str = r#"mutation($input: CreateProjectV2Input!) {
  createProjectV2(input: $input) {
    projectV2 { id number title shortDescription public closed url createdAt updatedAt }
  }
}"#;

const SETTINGS_MUTATION: &str = r#"mutation($input: UpdateProjectV2Input!) {
  updateProjectV2(input: $input) {
    projectV2 { id number title shortDescription public closed url createdAt updatedAt }
  }
}"#;

#[derive(Debug, Serialize)]
struct CreatedProject {
    project: ProjectV2,
    owner: AccountIdentity,
}

/// Tool for creating new projects
#[derive(Default)]
pub struct CreateProjectTool;

impl CreateProjectTool {
    /// Creates a new instance of the CreateProjectTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateProjectTool {
    fn name(&self) -> &'static str {
        "create_project_v2"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::string("owner", "User or organization login to own the project")
                .required(),
            ParameterSpec::string("title", "Project title").required(),
            ParameterSpec::string("description", "Short description of the project"),
            ParameterSpec::boolean("public", "Whether the project is public"),
        ]
    }

    fn mutating(&self) -> bool {
        true
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let owner = binder.require_string("owner")?;
        let title = binder.require_string("title")?;
        let description = binder.optional_string_present("description")?;
        let public = binder.optional_bool_present("public")?;

        let account = context.resolve_account(&owner).await?;
        tracing::debug!("Creating project '{}' for {:?} {}", title, account.kind, owner);

        let request = GraphQlRequest::new(
            CREATE_MUTATION,
            json!({ "input": { "ownerId": account.node_id, "title": title } }),
        );
        let created = mutation_payload(
            context.graphql(request).await?,
            &["createProjectV2", "projectV2"],
        )?;
        let mut project = ProjectV2::from_value(created)?;
        tracing::info!("Created project {} ({})", project.number, project.id);

        let mut settings = Map::new();
        if let Some(description) = description {
            settings.insert("shortDescription".into(), json!(description));
        }
        if let Some(public) = public {
            settings.insert("public".into(), json!(public));
        }
        if !settings.is_empty() {
            settings.insert("projectId".into(), json!(project.id));
            let request =
                GraphQlRequest::new(SETTINGS_MUTATION, json!({ "input": Value::Object(settings) }));
            let updated = mutation_payload(
                context.graphql(request).await?,
                &["updateProjectV2", "projectV2"],
            )?;
            project = ProjectV2::from_value(updated)?;
        }

        BaseToolImpl::json_response(&CreatedProject {
            project,
            owner: account,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{result_json, test_context, MockGitHubApi};
    use std::sync::Arc;

    fn project(description: Option<&str>, public: bool) -> Value {
        json!({
            "id": "PVT_9",
            "number": 9,
            "title": "Launch",
            "shortDescription": description,
            "public": public,
            "closed": false,
            "url": "https://github.com/orgs/acme/projects/9"
        })
    }

    #[tokio::test]
    async fn test_create_for_organization_then_apply_settings() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_graphql(Ok(json!({ "user": null })));
        api.push_graphql(Ok(json!({ "organization": { "id": "O_acme", "login": "acme" } })));
        api.push_graphql(Ok(json!({ "createProjectV2": { "projectV2": project(None, false) } })));
        api.push_graphql(Ok(json!({
            "updateProjectV2": { "projectV2": project(Some("Q3 launch"), true) }
        })));

        let args = json!({
            "owner": "acme",
            "title": "Launch",
            "description": "Q3 launch",
            "public": true
        });
        let result = CreateProjectTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap();

        let output = result_json(&result);
        assert_eq!(output["project"]["shortDescription"], "Q3 launch");
        assert_eq!(output["project"]["public"], true);
        assert_eq!(output["owner"]["kind"], "group");

        let requests = api.graphql_requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(
            requests[2].variables,
            json!({ "input": { "ownerId": "O_acme", "title": "Launch" } })
        );
        assert_eq!(
            requests[3].variables,
            json!({ "input": { "projectId": "PVT_9", "shortDescription": "Q3 launch", "public": true } })
        );
    }

    #[tokio::test]
    async fn test_create_for_viewer_without_settings() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_graphql(Ok(json!({ "createProjectV2": { "projectV2": project(None, false) } })));

        let args = json!({ "owner": "octocat", "title": "Launch" });
        let result = CreateProjectTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap();

        assert_eq!(result_json(&result)["owner"]["kind"], "individual");
        let requests = api.graphql_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].variables["input"]["ownerId"], "U_octocat");
    }

    #[tokio::test]
    async fn test_unknown_owner_creates_nothing() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_graphql(Ok(json!({ "user": null })));
        api.push_graphql(Ok(json!({ "organization": null })));

        let args = json!({ "owner": "nobody", "title": "Launch" });
        let err = CreateProjectTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("could not find user or organization with login: nobody"));
        assert_eq!(api.graphql_requests().len(), 2);
    }
}
