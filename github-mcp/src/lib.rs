//! # GitHub MCP Server
//!
//! A Model Context Protocol server exposing GitHub operations as tools.
//!
//! ## Features
//!
//! - **Tool catalogue**: issues, pull requests, repositories, search and Projects (v2)
//! - **Typed arguments**: [`mcp::ParameterBinder`] turns untyped JSON into checked values
//! - **Rate limits**: every outbound call is wrapped by [`rate_limit::RateLimitGuard`]
//! - **Identity**: logins resolve to user or organization node ids through [`identity::IdentityResolver`]
//! - **Read-only mode**: mutating tools are left out of the registry entirely
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use github_mcp::{Config, McpServer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?.with_read_only(true);
//! let server = McpServer::new(&config)?;
//! println!("{} tools", server.tool_registry().len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Outbound GitHub API access
pub mod client;

/// Shared helpers
pub mod common;

/// Runtime configuration
pub mod config;

/// Error types
pub mod error;

/// Login to account resolution
pub mod identity;

/// Model Context Protocol (MCP) server support
pub mod mcp;

/// Rate limit observation and retry
pub mod rate_limit;

/// Test utilities for GitHub MCP tests
#[doc(hidden)]
pub mod test_utils;

pub use client::{GitHubApi, HttpGitHubClient};
pub use config::Config;
pub use error::{GitHubMcpError, Result};
pub use mcp::McpServer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
