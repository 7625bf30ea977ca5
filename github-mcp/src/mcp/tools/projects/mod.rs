//! Projects (v2) tools for MCP operations
//!
//! Projects live only in the GraphQL API. Read tools address a project by
//! owner login and number or by node id; mutations always take node ids, which
//! `get_project_v2` and `list_project_v2_items` return.

pub mod add_draft_issue;
pub mod add_item;
pub mod create;
pub mod delete_item;
pub mod get;
pub mod list_fields;
pub mod list_items;
pub mod update;
pub mod update_item;

use crate::mcp::params::ParameterSpec;
use crate::mcp::tool_registry::ToolRegistryBuilder;
use crate::{GitHubMcpError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Largest page GraphQL connections accept
const MAX_CONNECTION_PAGE: i64 = 100;

/// Register all project tools with the registry
pub fn register_project_tools(registry: &mut ToolRegistryBuilder) -> Result<()> {
    registry.register(get::GetProjectTool::new())?;
    registry.register(list_fields::ListProjectFieldsTool::new())?;
    registry.register(list_items::ListProjectItemsTool::new())?;
    registry.register(create::CreateProjectTool::new())?;
    registry.register(update::UpdateProjectTool::new())?;
    registry.register(add_item::AddProjectItemTool::new())?;
    registry.register(add_draft_issue::AddDraftIssueTool::new())?;
    registry.register(update_item::UpdateProjectItemTool::new())?;
    registry.register(delete_item::DeleteProjectItemTool::new())?;
    Ok(())
}

/// A project as returned by the project tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectV2 {
    /// GraphQL node id
    pub id: String,
    /// Number, unique per owner
    pub number: i64,
    /// Title
    pub title: String,
    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    /// Whether the project is visible to everyone
    #[serde(default)]
    pub public: bool,
    /// Whether the project is closed
    #[serde(default)]
    pub closed: bool,
    /// Web URL
    pub url: String,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProjectV2 {
    fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

fn project_id_spec() -> ParameterSpec {
    ParameterSpec::string("project_id", "Project node ID").required()
}

fn first_spec(description: &'static str, default: i64) -> ParameterSpec {
    ParameterSpec::integer("first", description)
        .with_bounds(1, MAX_CONNECTION_PAGE)
        .with_default(default)
}

/// The project node id addressed nothing
fn project_node_not_found(project_id: &str) -> GitHubMcpError {
    GitHubMcpError::NotFound(format!("project {project_id} not found"))
}
