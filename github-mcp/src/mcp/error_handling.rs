//! Translation of library errors into MCP results
//!
//! Every tool call yields exactly one result. Failures the agent can act on
//! (bad arguments, missing resources, permissions, quota, upstream and
//! transport trouble, cancellation) become `isError = true` results carrying
//! the message. An unknown tool name is an `invalid_request` protocol error;
//! anything else is an internal fault and surfaces as `internal_error`.

use super::tool_registry::BaseToolImpl;
use crate::{GitHubMcpError, Result};
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Common error handling patterns for MCP operations
pub struct McpErrorHandler;

impl McpErrorHandler {
    /// Convert a handler outcome into what `tools/call` returns
    pub fn into_call_result(
        result: Result<CallToolResult>,
        operation: &str,
    ) -> std::result::Result<CallToolResult, McpError> {
        result.or_else(|error| Self::handle_error(error, operation))
    }

    /// Map a [`GitHubMcpError`] to a tool-error result or a protocol error
    pub fn handle_error(
        error: GitHubMcpError,
        operation: &str,
    ) -> std::result::Result<CallToolResult, McpError> {
        match error {
            GitHubMcpError::UnknownTool(name) => {
                tracing::debug!("Rejected call to unknown tool {}", name);
                Err(McpError::invalid_request(format!("Unknown tool: {name}"), None))
            }
            error if error.is_tool_error() => {
                tracing::warn!("Tool '{}' failed: {}", operation, error);
                Ok(BaseToolImpl::create_error_response(error.to_string(), None))
            }
            error => {
                tracing::error!("Tool '{}' hit an internal error: {}", operation, error);
                Err(McpError::internal_error(
                    format!("{operation} failed: {error}"),
                    None,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::params::{ParameterKind, ValidationError};
    use rmcp::model::RawContent;

    fn error_text(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_user_facing_errors_become_tool_errors() {
        let cases = vec![
            GitHubMcpError::Validation(ValidationError::Missing {
                parameter: "owner".into(),
                expected: ParameterKind::String,
            }),
            GitHubMcpError::NotFound("project 42 not found for owner acme".into()),
            GitHubMcpError::Permission("needs project scope".into()),
            GitHubMcpError::rate_limit("max retries (3) exceeded", None),
            GitHubMcpError::Transport("connection reset".into()),
            GitHubMcpError::upstream("Validation Failed"),
            GitHubMcpError::Cancelled,
        ];

        for error in cases {
            let expected = error.to_string();
            let result = McpErrorHandler::handle_error(error, "get_project_v2").unwrap();
            assert_eq!(result.is_error, Some(true));
            assert_eq!(error_text(&result), expected);
        }
    }

    #[test]
    fn test_unknown_tool_is_protocol_error() {
        let err = McpErrorHandler::handle_error(GitHubMcpError::UnknownTool("nope".into()), "nope")
            .unwrap_err();
        assert!(err.message.contains("Unknown tool: nope"));
    }

    #[test]
    fn test_internal_fault_is_protocol_error() {
        let err = McpErrorHandler::handle_error(
            GitHubMcpError::Internal("cannot build request".into()),
            "get_me",
        )
        .unwrap_err();
        assert!(err.message.contains("cannot build request"));
    }

    #[test]
    fn test_success_passes_through() {
        let ok = BaseToolImpl::create_success_response("done");
        let result = McpErrorHandler::into_call_result(Ok(ok), "get_me").unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(error_text(&result), "done");
    }
}
