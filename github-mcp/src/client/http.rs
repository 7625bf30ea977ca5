//! [`GitHubApi`] over HTTP with `reqwest`

use super::classify::{classify_graphql_errors, classify_rest_failure, rest_error_message};
use super::{ApiResponse, GitHubApi, GraphQlRequest, RestRequest};
use crate::config::Config;
use crate::rate_limit::RateLimitState;
use crate::{GitHubMcpError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, RETRY_AFTER};
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use url::Url;

const GITHUB_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";

/// HTTP client for the REST and GraphQL endpoints
///
/// Cheap to share: the underlying connection pool is reference counted.
#[derive(Clone)]
pub struct HttpGitHubClient {
    http: Client,
    rest_base: Url,
    graphql_url: Url,
    token: String,
}

impl HttpGitHubClient {
    /// Create a client for the endpoints and credential in `config`
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));

        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GitHubMcpError::Internal(format!("failed to build HTTP client: {e}")))?;

        let parse = |raw: &str| {
            Url::parse(raw)
                .map_err(|e| GitHubMcpError::Internal(format!("invalid API URL '{raw}': {e}")))
        };

        Ok(Self {
            http,
            rest_base: parse(&config.rest_base_url)?,
            graphql_url: parse(&config.graphql_url)?,
            token: config.token.clone(),
        })
    }

    /// Resolve REST path segments against the base URL, percent-encoding each
    pub fn rest_url(&self, segments: &[String]) -> Result<Url> {
        let mut url = self.rest_base.clone();
        url.path_segments_mut()
            .map_err(|_| GitHubMcpError::Internal(format!("cannot append a path to {}", self.rest_base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<RawResponse> {
        let response = builder.bearer_auth(&self.token).send().await?;
        let status = response.status().as_u16();
        let headers = response.headers();
        let rate = parse_rate_limit(headers);
        let retry_after = parse_retry_after(headers);
        let oauth_scopes = header_str(headers, "x-oauth-scopes").map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|scope| !scope.is_empty())
                .map(str::to_string)
                .collect()
        });
        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::Null)
        };

        Ok(RawResponse {
            status,
            rate,
            retry_after,
            oauth_scopes,
            text,
            body,
        })
    }
}

struct RawResponse {
    status: u16,
    rate: Option<RateLimitState>,
    retry_after: Option<DateTime<Utc>>,
    oauth_scopes: Option<Vec<String>>,
    text: String,
    body: Value,
}

impl RawResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn into_failure(self) -> GitHubMcpError {
        let message = rest_error_message(self.status, &self.body, &self.text);
        classify_rest_failure(self.status, message, self.rate.as_ref(), self.retry_after)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Read the quota header triple
pub fn parse_rate_limit(headers: &HeaderMap) -> Option<RateLimitState> {
    RateLimitState::from_header_values(
        header_str(headers, "x-ratelimit-remaining"),
        header_str(headers, "x-ratelimit-limit"),
        header_str(headers, "x-ratelimit-reset"),
    )
}

/// `Retry-After` in seconds, turned into an absolute time
fn parse_retry_after(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    let secs: i64 = headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse().ok()?;
    Some(Utc::now() + chrono::Duration::seconds(secs))
}

#[async_trait]
impl GitHubApi for HttpGitHubClient {
    async fn rest(&self, request: RestRequest) -> Result<ApiResponse> {
        let url = self.rest_url(&request.segments)?;
        tracing::debug!("GitHub REST {} {}", request.method, request.path());

        let mut builder = self.http.request(request.method.clone(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let raw = self.send(builder).await?;
        if !raw.is_success() {
            tracing::debug!("GitHub REST {} failed with {}", request.path(), raw.status);
            return Err(raw.into_failure());
        }

        Ok(ApiResponse {
            status: raw.status,
            body: raw.body,
            rate: raw.rate,
            oauth_scopes: raw.oauth_scopes,
        })
    }

    async fn graphql(&self, request: GraphQlRequest) -> Result<ApiResponse> {
        tracing::debug!("GitHub GraphQL {}", request.operation());

        let builder = self.http.post(self.graphql_url.clone()).json(&json!({
            "query": request.query,
            "variables": request.variables,
        }));

        let raw = self.send(builder).await?;
        if !raw.is_success() {
            return Err(raw.into_failure());
        }

        if let Some(errors) = raw.body.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                return Err(classify_graphql_errors(errors, raw.rate.as_ref()));
            }
        }

        let data = raw.body.get("data").cloned().unwrap_or(Value::Null);
        Ok(ApiResponse {
            status: raw.status,
            body: data,
            rate: raw.rate,
            oauth_scopes: raw.oauth_scopes,
        })
    }
}
