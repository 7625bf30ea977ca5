//! Outbound GitHub API access
//!
//! Tools talk to GitHub through the [`GitHubApi`] trait, which offers the two
//! call shapes the API exposes: a REST request (method, path, query, body) and
//! a GraphQL request (document, variables). Both return an [`ApiResponse`]
//! carrying the quota header triple so every call can be wrapped by
//! [`crate::rate_limit::RateLimitGuard`].

use crate::mcp::params::Pagination;
use crate::rate_limit::{QuotaReport, RateLimitState};
use crate::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

pub mod classify;
pub mod http;

pub use http::HttpGitHubClient;

/// A REST call against the API
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    /// HTTP method
    pub method: Method,
    /// Unencoded path segments, e.g. `["repos", "acme", "widgets"]`
    pub segments: Vec<String>,
    /// Query string pairs, in order
    pub query: Vec<(String, String)>,
    /// JSON body, if any
    pub body: Option<Value>,
}

impl RestRequest {
    /// Create a request for the given method and path segments
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            method,
            segments: segments
                .into_iter()
                .map(|segment| segment.as_ref().to_string())
                .collect(),
            query: Vec::new(),
            body: None,
        }
    }

    /// GET request
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Method::GET, segments)
    }

    /// POST request
    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Method::POST, segments)
    }

    /// PATCH request
    pub fn patch<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Method::PATCH, segments)
    }

    /// PUT request
    pub fn put<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Method::PUT, segments)
    }

    /// Append a query pair
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a query pair unless the value is empty
    pub fn query_non_empty(self, key: &str, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.query(key, value)
        }
    }

    /// Append `page` and `per_page`
    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.query.extend(pagination.query_pairs());
        self
    }

    /// Attach a JSON body
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Path joined with `/`, without encoding; used for logging
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Value of a query parameter, if set
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A GraphQL query or mutation
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQlRequest {
    /// Query document
    pub query: String,
    /// Variable mapping
    pub variables: Value,
}

impl GraphQlRequest {
    /// Create a request from a document and its variables
    pub fn new(query: impl Into<String>, variables: Value) -> Self {
        Self {
            query: query.into(),
            variables,
        }
    }

    /// Name of the first top-level field selected, for logging
    pub fn operation(&self) -> &str {
        let body = self
            .query
            .split_once('{')
            .map(|(_, rest)| rest)
            .unwrap_or_default();
        body.trim_start()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .next()
            .unwrap_or_default()
    }
}

/// Successful response of either call shape
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status
    pub status: u16,
    /// Parsed JSON body; for GraphQL calls this is the `data` member
    pub body: Value,
    /// Quota header triple, when the response carried one
    pub rate: Option<RateLimitState>,
    /// Scopes granted to the token, from `X-OAuth-Scopes`
    pub oauth_scopes: Option<Vec<String>>,
}

impl ApiResponse {
    /// A 200 response with the given body and no quota information
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body,
            rate: None,
            oauth_scopes: None,
        }
    }

    /// Attach quota information
    pub fn with_rate(mut self, rate: RateLimitState) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Consume the response, keeping only the body
    pub fn into_body(self) -> Value {
        self.body
    }
}

impl QuotaReport for ApiResponse {
    fn quota(&self) -> Option<&RateLimitState> {
        self.rate.as_ref()
    }
}

/// The two outbound call shapes of the GitHub API
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Perform a REST call
    async fn rest(&self, request: RestRequest) -> Result<ApiResponse>;

    /// Perform a GraphQL call
    async fn graphql(&self, request: GraphQlRequest) -> Result<ApiResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rest_request_builder() {
        let request = RestRequest::get(["repos", "acme", "widgets", "issues"])
            .query_non_empty("state", "open")
            .query_non_empty("labels", "")
            .paginate(Pagination::default());

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path(), "/repos/acme/widgets/issues");
        assert_eq!(request.query_value("state"), Some("open"));
        assert_eq!(request.query_value("labels"), None);
        assert_eq!(request.query_value("per_page"), Some("30"));
        assert!(request.body.is_none());
    }

    #[test]
    fn test_graphql_operation_name() {
        let request = GraphQlRequest::new(
            "query($login: String!) { user(login: $login) { id } }",
            json!({ "login": "octocat" }),
        );
        assert_eq!(request.operation(), "user");

        let mutation = GraphQlRequest::new(
            "mutation { deleteProjectV2Item(input: {}) { deletedItemId } }",
            json!({}),
        );
        assert_eq!(mutation.operation(), "deleteProjectV2Item");
    }
}
