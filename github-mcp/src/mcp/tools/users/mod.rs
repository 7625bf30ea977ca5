//! User account tools

pub mod me;

use crate::mcp::tool_registry::ToolRegistryBuilder;
use crate::Result;

/// Register all user tools with the registry
pub fn register_user_tools(registry: &mut ToolRegistryBuilder) -> Result<()> {
    registry.register(me::GetMeTool::new())?;
    Ok(())
}
