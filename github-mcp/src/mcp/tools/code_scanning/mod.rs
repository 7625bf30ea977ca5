//! Code scanning alert tools

pub mod get_alert;
pub mod list_alerts;

use crate::mcp::tool_registry::ToolRegistryBuilder;
use crate::Result;

/// Register all code scanning tools with the registry
pub fn register_code_scanning_tools(registry: &mut ToolRegistryBuilder) -> Result<()> {
    registry.register(get_alert::GetCodeScanningAlertTool::new())?;
    registry.register(list_alerts::ListCodeScanningAlertsTool::new())?;
    Ok(())
}
