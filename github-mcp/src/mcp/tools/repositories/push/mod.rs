//! Multi-file commits through the git data API
//!
//! The commit is built in four steps: read the branch head, create a tree on
//! top of the head's tree, create a commit with the head as parent, then move
//! the branch ref. Nothing is visible on the branch until the last step.

use super::{branch_head, branch_ref_segments, string_at};
use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterKind, ParameterSpec, ValidationError};
use crate::mcp::shared_utils::{path_segments, specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{json, Value};

const REGULAR_FILE_MODE: &str = "100644";

/// Tool committing several files to a branch at once
#[derive(Default)]
pub struct PushFilesTool;

impl PushFilesTool {
    /// Creates a new instance of the PushFilesTool
    pub fn new() -> Self {
        Self
    }

    /// Tree entries for the supplied files, validated before any call is made
    fn tree_entries(binder: &ParameterBinder<'_>) -> Result<Vec<Value>> {
        let files = binder.optional_object_array("files")?;
        if files.is_empty() {
            return Err(ValidationError::Missing {
                parameter: "files".into(),
                expected: ParameterKind::ObjectArray,
            }
            .into());
        }

        files
            .into_iter()
            .enumerate()
            .map(|(index, fields)| -> Result<Value> {
                let file = ParameterBinder::new(fields);
                let nested = |e: ValidationError| ValidationError::Invalid {
                    parameter: "files".into(),
                    expected: ParameterKind::ObjectArray,
                    reason: format!("file {index}: {e}"),
                };
                let path = file.require_string("path").map_err(nested)?;
                let path = path_segments("path", &path).map_err(nested)?.join("/");
                let content = file.optional_string("content").map_err(nested)?;
                Ok(json!({
                    "path": path,
                    "mode": REGULAR_FILE_MODE,
                    "type": "blob",
                    "content": content,
                }))
            })
            .collect()
    }
}

#[async_trait]
impl McpTool for PushFilesTool {
    fn name(&self) -> &'static str {
        "push_files"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            RepoRef::specs(),
            [
                ParameterSpec::string("branch", "Branch to push to").required(),
                ParameterSpec::object_array(
                    "files",
                    "Array of file objects to push, each with path and content",
                )
                .required(),
                ParameterSpec::string("message", "Commit message").required(),
            ],
        )
    }

    fn mutating(&self) -> bool {
        true
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;
        let branch = binder.require_string("branch")?;
        let message = binder.require_string("message")?;
        let entries = Self::tree_entries(&binder)?;

        let head = branch_head(context, &repo, &branch).await?;
        let head_commit = context
            .rest(RestRequest::get(repo.segments(&["git", "commits", head.as_str()])))
            .await?;
        let base_tree = string_at(&head_commit.body, "/tree/sha", || {
            format!("commit {head} has no tree")
        })?;

        tracing::debug!("Building tree of {} files on {}", entries.len(), base_tree);
        let tree = context
            .rest(
                RestRequest::post(repo.segments(&["git", "trees"]))
                    .json(json!({ "base_tree": base_tree, "tree": entries })),
            )
            .await?;
        let tree_sha = string_at(&tree.body, "/sha", || "created tree has no sha".to_string())?;

        let commit = context
            .rest(
                RestRequest::post(repo.segments(&["git", "commits"]))
                    .json(json!({ "message": message, "tree": tree_sha, "parents": [head] })),
            )
            .await?;
        let commit_sha = string_at(&commit.body, "/sha", || "created commit has no sha".to_string())?;

        tracing::info!("Moving {}/{}:{} to {}", repo.owner, repo.repo, branch, commit_sha);
        let request = RestRequest::patch(branch_ref_segments(&repo, "refs", &branch)?)
            .json(json!({ "sha": commit_sha, "force": false }));
        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{result_json, test_context, MockGitHubApi};
    use crate::GitHubMcpError;
    use reqwest::Method;
    use std::sync::Arc;

    fn args() -> Value {
        json!({
            "owner": "acme",
            "repo": "widgets",
            "branch": "main",
            "message": "Add docs",
            "files": [
                { "path": "docs/a.md", "content": "# A" },
                { "path": "/docs/b.md", "content": "# B" }
            ]
        })
    }

    #[tokio::test]
    async fn test_push_builds_tree_commit_and_moves_ref() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_rest(Ok(json!({ "object": { "sha": "head1" } })));
        api.push_rest(Ok(json!({ "sha": "head1", "tree": { "sha": "tree1" } })));
        api.push_rest(Ok(json!({ "sha": "tree2" })));
        api.push_rest(Ok(json!({ "sha": "commit2" })));
        api.push_rest(Ok(json!({ "ref": "refs/heads/main", "object": { "sha": "commit2" } })));

        let result = PushFilesTool::new()
            .execute(args().as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap();

        assert_eq!(result_json(&result)["object"]["sha"], "commit2");
        let requests = api.rest_requests();
        assert_eq!(requests.len(), 5);
        assert_eq!(requests[0].path(), "/repos/acme/widgets/git/ref/heads/main");
        assert_eq!(requests[1].path(), "/repos/acme/widgets/git/commits/head1");
        assert_eq!(requests[2].path(), "/repos/acme/widgets/git/trees");
        assert_eq!(
            requests[2].body,
            Some(json!({
                "base_tree": "tree1",
                "tree": [
                    { "path": "docs/a.md", "mode": "100644", "type": "blob", "content": "# A" },
                    { "path": "docs/b.md", "mode": "100644", "type": "blob", "content": "# B" }
                ]
            }))
        );
        assert_eq!(
            requests[3].body,
            Some(json!({ "message": "Add docs", "tree": "tree2", "parents": ["head1"] }))
        );
        assert_eq!(requests[4].method, Method::PATCH);
        assert_eq!(requests[4].path(), "/repos/acme/widgets/git/refs/heads/main");
        assert_eq!(requests[4].body, Some(json!({ "sha": "commit2", "force": false })));
    }

    #[tokio::test]
    async fn test_bad_file_entry_fails_before_any_call() {
        let api = Arc::new(MockGitHubApi::new());
        let mut arguments = args();
        arguments["files"][1] = json!({ "path": "../outside.md", "content": "x" });

        let err = PushFilesTool::new()
            .execute(arguments.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap_err();

        match err {
            GitHubMcpError::Validation(e) => {
                assert_eq!(e.parameter(), "files");
                assert!(e.to_string().contains("file 1"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(api.rest_requests().is_empty());
    }

    #[tokio::test]
    async fn test_empty_files_is_missing() {
        let api = Arc::new(MockGitHubApi::new());
        let mut arguments = args();
        arguments["files"] = json!([]);

        let err = PushFilesTool::new()
            .execute(arguments.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("missing required parameter: files"));
        assert!(api.rest_requests().is_empty());
    }
}
