//! Model Context Protocol (MCP) server support
//!
//! This module provides the MCP server exposing GitHub operations as tools.

pub mod error_handling;
pub mod params;
pub mod server;
pub mod shared_utils;
pub mod tool_registry;
pub mod tools;

pub use params::{Arguments, ParameterBinder, ParameterSpec, ValidationError};
pub use server::McpServer;
pub use tool_registry::{McpTool, ToolCall, ToolContext, ToolRegistry, ToolRegistryBuilder};
pub use tools::{build_registry, register_all_tools};
