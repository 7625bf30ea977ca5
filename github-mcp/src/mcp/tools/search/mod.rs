//! Code and user search tools

pub mod code;
pub mod users;

use crate::mcp::params::ParameterSpec;
use crate::mcp::tool_registry::ToolRegistryBuilder;
use crate::Result;

/// Register all search tools with the registry
pub fn register_search_tools(registry: &mut ToolRegistryBuilder) -> Result<()> {
    registry.register(code::SearchCodeTool::new())?;
    registry.register(users::SearchUsersTool::new())?;
    Ok(())
}

fn order_spec() -> ParameterSpec {
    ParameterSpec::string("order", "Sort order").one_of(&["asc", "desc"])
}
