//! GitHub MCP Server CLI Library
//!
//! This library provides the pieces of the `github-mcp-server` binary:
//! argument parsing, logging setup, the stdio transport and exit codes.

/// Command-line interface definitions and argument parsing
pub mod cli;
/// Optional logging of MCP traffic
pub mod command_log;
/// Exit codes used by the CLI application
pub mod exit_codes;
/// Log output setup
pub mod logging;
/// Running the server over stdio
pub mod serve;
/// Shutdown signal handling
pub mod signal_handler;
