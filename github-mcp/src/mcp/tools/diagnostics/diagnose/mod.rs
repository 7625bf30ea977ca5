//! Connectivity and credential diagnosis

use crate::client::{ApiResponse, GraphQlRequest, RestRequest};
use crate::mcp::params::{Arguments, ParameterSpec};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::rate_limit::RateLimitState;
use crate::{GitHubMcpError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rmcp::model::CallToolResult;
use serde::Serialize;
use serde_json::{json, Value};

const VIEWER_LOGIN_QUERY: &str = "query { viewer { login } }";

/// Scopes the full tool catalogue needs, each with the alternatives that also satisfy it
const RECOMMENDED_SCOPES: &[(&str, &[&str])] = &[
    ("repo", &["repo", "public_repo"]),
    ("project", &["project", "read:project"]),
];

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct EndpointCheck {
    reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl EndpointCheck {
    fn from_outcome(outcome: &Result<ApiResponse>, login_path: &[&str]) -> Self {
        match outcome {
            Ok(response) => Self {
                reachable: true,
                login: login_path
                    .iter()
                    .try_fold(&response.body, |value, key| value.get(*key))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                error: None,
            },
            Err(error) => Self {
                // An answer from GitHub, even a refusal, proves the endpoint is reachable.
                reachable: !matches!(
                    error,
                    GitHubMcpError::Transport(_) | GitHubMcpError::Internal(_)
                ),
                login: None,
                error: Some(error.to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuotaSnapshot {
    remaining: u64,
    limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    reset_at: Option<DateTime<Utc>>,
}

impl From<&RateLimitState> for QuotaSnapshot {
    fn from(state: &RateLimitState) -> Self {
        Self {
            remaining: state.remaining,
            limit: state.limit,
            reset_at: state.reset_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Diagnosis {
    rest: EndpointCheck,
    graphql: EndpointCheck,
    token_scopes: Option<Vec<String>>,
    missing_scopes: Vec<&'static str>,
    rate_limit: Option<QuotaSnapshot>,
}

fn missing_scopes(granted: &[String]) -> Vec<&'static str> {
    RECOMMENDED_SCOPES
        .iter()
        .filter(|(_, satisfied_by)| {
            !satisfied_by
                .iter()
                .any(|scope| granted.iter().any(|g| g == scope))
        })
        .map(|(scope, _)| *scope)
        .collect()
}

/// Tool reporting reachability, identity, scopes and quota
#[derive(Default)]
pub struct DiagnoseTool;

impl DiagnoseTool {
    /// Creates a new instance of the DiagnoseTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for DiagnoseTool {
    fn name(&self) -> &'static str {
        "diagnose_github_mcp"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        Vec::new()
    }

    async fn execute(&self, _arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let rest = context.rest(RestRequest::get(["user"])).await;
        if matches!(rest, Err(GitHubMcpError::Cancelled)) {
            return Err(GitHubMcpError::Cancelled);
        }
        let graphql = context
            .graphql(GraphQlRequest::new(VIEWER_LOGIN_QUERY, json!({})))
            .await;
        if matches!(graphql, Err(GitHubMcpError::Cancelled)) {
            return Err(GitHubMcpError::Cancelled);
        }

        let token_scopes = rest
            .as_ref()
            .ok()
            .and_then(|response| response.oauth_scopes.clone());
        // Fine-grained tokens report no scopes; nothing can be said about them.
        let missing = token_scopes
            .as_deref()
            .map(missing_scopes)
            .unwrap_or_default();
        let rate_limit = [&rest, &graphql]
            .into_iter()
            .filter_map(|outcome| outcome.as_ref().ok())
            .find_map(|response| response.rate.as_ref())
            .map(QuotaSnapshot::from);

        let diagnosis = Diagnosis {
            rest: EndpointCheck::from_outcome(&rest, &["login"]),
            graphql: EndpointCheck::from_outcome(&graphql, &["viewer", "login"]),
            token_scopes,
            missing_scopes: missing,
            rate_limit,
        };
        tracing::info!(
            "Diagnosis: rest reachable={}, graphql reachable={}",
            diagnosis.rest.reachable,
            diagnosis.graphql.reachable
        );
        BaseToolImpl::json_response(&diagnosis)
    }
}
