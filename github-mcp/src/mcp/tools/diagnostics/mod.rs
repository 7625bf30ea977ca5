//! Self-diagnosis tools

pub mod diagnose;

use crate::mcp::tool_registry::ToolRegistryBuilder;
use crate::Result;

/// Register all diagnostics tools with the registry
pub fn register_diagnostics_tools(registry: &mut ToolRegistryBuilder) -> Result<()> {
    registry.register(diagnose::DiagnoseTool::new())?;
    Ok(())
}
