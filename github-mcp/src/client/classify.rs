//! Mapping of upstream failures onto [`GitHubMcpError`]
//!
//! Structured signals win: the REST status code and the GraphQL `errors[].type`
//! field. Matching on the message text is only a fallback for errors that
//! carry no machine-readable code.

use crate::rate_limit::RateLimitState;
use crate::GitHubMcpError;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Pull a human-readable message out of a REST error body
pub fn rest_error_message(status: u16, body: &Value, raw: &str) -> String {
    let mut message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                format!("HTTP {status}")
            } else {
                trimmed.to_string()
            }
        });

    // 422 responses list the offending fields separately
    if let Some(details) = body.get("errors").and_then(Value::as_array) {
        let details: Vec<String> = details
            .iter()
            .filter_map(|detail| match detail {
                Value::String(text) => Some(text.clone()),
                Value::Object(fields) => fields
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .or_else(|| {
                        let field = fields.get("field").and_then(Value::as_str)?;
                        let code = fields.get("code").and_then(Value::as_str)?;
                        Some(format!("{field} {code}"))
                    }),
                _ => None,
            })
            .collect();
        if !details.is_empty() {
            message = format!("{message} ({})", details.join("; "));
        }
    }
    message
}

/// Classify a non-2xx REST response
pub fn classify_rest_failure(
    status: u16,
    message: String,
    rate: Option<&RateLimitState>,
    retry_after: Option<DateTime<Utc>>,
) -> GitHubMcpError {
    let reset_at = retry_after.or_else(|| rate.and_then(|r| r.reset_at));
    let quota_exhausted = rate.is_some_and(RateLimitState::is_exhausted);

    match status {
        429 => GitHubMcpError::rate_limit(message, reset_at),
        403 if quota_exhausted || mentions_rate_limit(&message) => {
            GitHubMcpError::rate_limit(message, reset_at)
        }
        401 | 403 => GitHubMcpError::Permission(message),
        404 => GitHubMcpError::NotFound(message),
        _ => GitHubMcpError::Upstream {
            status: Some(status),
            message,
        },
    }
}

/// Classify the `errors` array of a GraphQL response
///
/// The first error's `type` decides the class; messages of all errors are
/// joined into the reported text.
pub fn classify_graphql_errors(errors: &[Value], rate: Option<&RateLimitState>) -> GitHubMcpError {
    let message = errors
        .iter()
        .filter_map(|error| error.get("message").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join("; ");
    let message = if message.is_empty() {
        "GraphQL request failed".to_string()
    } else {
        message
    };
    let reset_at = rate.and_then(|r| r.reset_at);

    let code = errors
        .first()
        .and_then(|error| error.get("type"))
        .and_then(Value::as_str);

    match code {
        Some("NOT_FOUND") => GitHubMcpError::NotFound(message),
        Some("FORBIDDEN") | Some("INSUFFICIENT_SCOPES") => GitHubMcpError::Permission(message),
        Some("RATE_LIMITED") => GitHubMcpError::rate_limit(message, reset_at),
        Some(_) => GitHubMcpError::upstream(message),
        None => classify_message(message, reset_at),
    }
}

/// Fallback classification on message text
pub fn classify_message(message: String, reset_at: Option<DateTime<Utc>>) -> GitHubMcpError {
    if message.contains("NOT_FOUND") {
        GitHubMcpError::NotFound(message)
    } else if message.contains("FORBIDDEN") {
        GitHubMcpError::Permission(message)
    } else if mentions_rate_limit(&message) {
        GitHubMcpError::rate_limit(message, reset_at)
    } else {
        GitHubMcpError::upstream(message)
    }
}

fn mentions_rate_limit(message: &str) -> bool {
    message.to_ascii_lowercase().contains("rate limit")
}
