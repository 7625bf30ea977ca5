//! Shared utilities for MCP tool handlers

use super::params::{ParameterBinder, ParameterKind, ParameterSpec, ValidationError};
use crate::client::ApiResponse;
use crate::{GitHubMcpError, Result};
use serde_json::Value;

/// `owner` / `repo` pair addressing a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepoRef {
    /// Bind both required parameters
    pub fn bind(binder: &ParameterBinder<'_>) -> std::result::Result<Self, ValidationError> {
        Ok(Self {
            owner: binder.require_string("owner")?,
            repo: binder.require_string("repo")?,
        })
    }

    /// `repos/{owner}/{repo}` followed by `rest`
    pub fn segments<'a>(&'a self, rest: &[&'a str]) -> Vec<&'a str> {
        let mut segments = vec!["repos", self.owner.as_str(), self.repo.as_str()];
        segments.extend_from_slice(rest);
        segments
    }

    /// Parameter declarations for `owner` and `repo`
    pub fn specs() -> [ParameterSpec; 2] {
        [
            ParameterSpec::string("owner", "Repository owner").required(),
            ParameterSpec::string("repo", "Repository name").required(),
        ]
    }
}

/// Build a parameter list from fixed declarations plus extras
pub fn specs<const N: usize>(
    head: [ParameterSpec; N],
    tail: impl IntoIterator<Item = ParameterSpec>,
) -> Vec<ParameterSpec> {
    head.into_iter().chain(tail).collect()
}

/// Split a repository path into one segment per component
///
/// Empty components are dropped, so `/` is the repository root. `.` and `..` are rejected: URL resolution
/// would collapse them and address a different file.
pub fn path_segments<'a>(
    parameter: &str,
    path: &'a str,
) -> std::result::Result<Vec<&'a str>, ValidationError> {
    let mut segments = Vec::new();
    for part in path.split('/').filter(|part| !part.is_empty()) {
        if part == "." || part == ".." {
            return Err(ValidationError::Invalid {
                parameter: parameter.to_string(),
                expected: ParameterKind::String,
                reason: format!("must not contain '{part}' components"),
            });
        }
        segments.push(part);
    }
    Ok(segments)
}

/// Walk `path` into a GraphQL `data` value, treating `null` as absent
pub fn graphql_field<'a>(data: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(data, |value, key| value.get(*key))
        .filter(|value| !value.is_null())
}

/// Extract a mutation payload, failing when GitHub returned nothing
pub fn mutation_payload(response: ApiResponse, path: &[&str]) -> Result<Value> {
    let body = response.into_body();
    graphql_field(&body, path).cloned().ok_or_else(|| {
        GitHubMcpError::upstream(format!("{} returned no data", path.join(".")))
    })
}
