//! Test utilities for GitHub MCP tests
//!
//! [`MockGitHubApi`] stands in for the network: tests queue the responses each
//! call shape should return, run a tool or component, then inspect the
//! requests that were issued.
//!
//! ```no_run
//! use github_mcp::test_utils::MockGitHubApi;
//! use serde_json::json;
//!
//! let api = MockGitHubApi::new();
//! api.push_graphql(Ok(json!({ "viewer": { "id": "U_1", "login": "octocat" } })));
//! ```

use crate::client::{ApiResponse, GitHubApi, GraphQlRequest, RestRequest};
use crate::identity::{Session, Viewer};
use crate::mcp::tool_registry::ToolContext;
use crate::rate_limit::RateLimitGuard;
use crate::{GitHubMcpError, Result};
use async_trait::async_trait;
use rmcp::model::{CallToolResult, RawContent};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted [`GitHubApi`] that records every request
#[derive(Default)]
pub struct MockGitHubApi {
    rest_responses: Mutex<VecDeque<Result<ApiResponse>>>,
    graphql_responses: Mutex<VecDeque<Result<ApiResponse>>>,
    rest_requests: Mutex<Vec<RestRequest>>,
    graphql_requests: Mutex<Vec<GraphQlRequest>>,
}

impl MockGitHubApi {
    /// Create a mock with no scripted responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the body (or error) of the next REST call
    pub fn push_rest(&self, body: Result<Value>) {
        self.push_rest_response(body.map(ApiResponse::ok));
    }

    /// Queue the full response (or error) of the next REST call
    pub fn push_rest_response(&self, response: Result<ApiResponse>) {
        self.rest_responses
            .lock()
            .expect("mock state poisoned")
            .push_back(response);
    }

    /// Queue the `data` (or error) of the next GraphQL call
    pub fn push_graphql(&self, data: Result<Value>) {
        self.push_graphql_response(data.map(ApiResponse::ok));
    }

    /// Queue the full response (or error) of the next GraphQL call
    pub fn push_graphql_response(&self, response: Result<ApiResponse>) {
        self.graphql_responses
            .lock()
            .expect("mock state poisoned")
            .push_back(response);
    }

    /// REST requests issued so far
    pub fn rest_requests(&self) -> Vec<RestRequest> {
        self.rest_requests.lock().expect("mock state poisoned").clone()
    }

    /// GraphQL requests issued so far
    pub fn graphql_requests(&self) -> Vec<GraphQlRequest> {
        self.graphql_requests
            .lock()
            .expect("mock state poisoned")
            .clone()
    }
}

#[async_trait]
impl GitHubApi for MockGitHubApi {
    async fn rest(&self, request: RestRequest) -> Result<ApiResponse> {
        let path = request.path();
        self.rest_requests
            .lock()
            .expect("mock state poisoned")
            .push(request);
        self.rest_responses
            .lock()
            .expect("mock state poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(GitHubMcpError::Internal(format!(
                    "no scripted REST response for {path}"
                )))
            })
    }

    async fn graphql(&self, request: GraphQlRequest) -> Result<ApiResponse> {
        let operation = request.operation().to_string();
        self.graphql_requests
            .lock()
            .expect("mock state poisoned")
            .push(request);
        self.graphql_responses
            .lock()
            .expect("mock state poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(GitHubMcpError::Internal(format!(
                    "no scripted GraphQL response for {operation}"
                )))
            })
    }
}

/// The caller every test context is authenticated as
pub fn test_viewer() -> Viewer {
    Viewer {
        login: "octocat".to_string(),
        node_id: "U_octocat".to_string(),
    }
}

/// A tool context over `api` whose session already knows [`test_viewer`]
pub fn test_context(api: Arc<MockGitHubApi>) -> ToolContext {
    ToolContext::new(api, RateLimitGuard::default())
        .with_session(Arc::new(Session::with_viewer(test_viewer())))
}

/// Text of the first content block of a tool result
pub fn result_text(result: &CallToolResult) -> String {
    match result.content.first().map(|content| &content.raw) {
        Some(RawContent::Text(text)) => text.text.clone(),
        _ => panic!("expected a text result, got {result:?}"),
    }
}

/// First content block of a tool result, parsed as JSON
pub fn result_json(result: &CallToolResult) -> Value {
    serde_json::from_str(&result_text(result)).expect("tool result is not JSON")
}
