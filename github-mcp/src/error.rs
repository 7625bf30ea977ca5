//! Unified error handling for the GitHub MCP library
//!
//! Every failure a tool call can run into is one variant of [`GitHubMcpError`].
//! The variants mirror how the failure is surfaced to the agent: caller
//! mistakes and upstream conditions become tool-error results, internal
//! faults become protocol errors (see [`crate::mcp::error_handling`]).

use crate::config::ConfigError;
use crate::mcp::params::ValidationError;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// The main error type for the GitHub MCP library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GitHubMcpError {
    /// A tool argument was missing, zero-valued, mistyped or out of bounds
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Target resource or account does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// The credential lacks the scope needed for the operation
    #[error("insufficient permissions: {0}")]
    Permission(String),

    /// Quota exhausted and not recoverable within the retry budget
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimit {
        /// Description of the last observed rate-limit condition
        message: String,
        /// When the quota resets, if the upstream reported it
        reset_at: Option<DateTime<Utc>>,
    },

    /// Network or transport failure talking to the API
    #[error("transport error: {0}")]
    Transport(String),

    /// The API returned a domain error not otherwise classified
    #[error("GitHub API error: {message}")]
    Upstream {
        /// HTTP status, when the failure came from a REST call
        status: Option<u16>,
        /// Message reported by the API
        message: String,
    },

    /// The per-call cancellation signal fired
    #[error("request cancelled")]
    Cancelled,

    /// No tool with this name is registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A tool could not be added to the registry
    #[error("tool registration failed: {0}")]
    Registration(String),

    /// Invalid startup configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unrecoverable internal fault
    #[error("internal error: {0}")]
    Internal(String),
}

impl GitHubMcpError {
    /// Create an upstream error without an HTTP status
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            status: None,
            message: message.into(),
        }
    }

    /// Create a rate-limit error
    pub fn rate_limit(message: impl Into<String>, reset_at: Option<DateTime<Utc>>) -> Self {
        Self::RateLimit {
            message: message.into(),
            reset_at,
        }
    }

    /// Whether the rate-limit guard should wait and retry after this error
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimit { .. })
    }

    /// Whether this error is reported back to the agent as a tool-error result
    /// rather than a protocol failure
    pub fn is_tool_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::NotFound(_)
                | Self::Permission(_)
                | Self::RateLimit { .. }
                | Self::Transport(_)
                | Self::Upstream { .. }
                | Self::Cancelled
        )
    }
}

impl From<reqwest::Error> for GitHubMcpError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            Self::Internal(format!("failed to build request: {error}"))
        } else if error.is_decode() {
            Self::upstream(format!("failed to decode response: {error}"))
        } else {
            Self::Transport(error.to_string())
        }
    }
}

/// Result type alias for GitHub MCP operations
pub type Result<T> = std::result::Result<T, GitHubMcpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_is_transparent() {
        let err: GitHubMcpError = ValidationError::Missing {
            parameter: "owner".to_string(),
            expected: crate::mcp::params::ParameterKind::String,
        }
        .into();
        assert_eq!(err.to_string(), "missing required parameter: owner");
        assert!(err.is_tool_error());
    }

    #[test]
    fn test_internal_errors_are_not_tool_errors() {
        assert!(!GitHubMcpError::Internal("boom".into()).is_tool_error());
        assert!(!GitHubMcpError::UnknownTool("nope".into()).is_tool_error());
        assert!(!GitHubMcpError::Registration("dup".into()).is_tool_error());
    }

    #[test]
    fn test_rate_limit_helpers() {
        let err = GitHubMcpError::rate_limit("quota exhausted", None);
        assert!(err.is_rate_limit());
        assert_eq!(
            err.to_string(),
            "GitHub API rate limit exceeded: quota exhausted"
        );
        assert!(!GitHubMcpError::Cancelled.is_rate_limit());
    }
}
