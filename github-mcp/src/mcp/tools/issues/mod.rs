//! Issue tools for MCP operations
//!
//! Each tool is in its own submodule with dedicated implementation and description.

pub mod add_comment;
pub mod comments;
pub mod create;
pub mod get;
pub mod list;
pub mod search;
pub mod update;

use crate::mcp::tool_registry::ToolRegistryBuilder;
use crate::Result;

/// Register all issue tools with the registry
pub fn register_issue_tools(registry: &mut ToolRegistryBuilder) -> Result<()> {
    registry.register(get::GetIssueTool::new())?;
    registry.register(list::ListIssuesTool::new())?;
    registry.register(search::SearchIssuesTool::new())?;
    registry.register(comments::GetIssueCommentsTool::new())?;
    registry.register(create::CreateIssueTool::new())?;
    registry.register(add_comment::AddIssueCommentTool::new())?;
    registry.register(update::UpdateIssueTool::new())?;
    Ok(())
}
