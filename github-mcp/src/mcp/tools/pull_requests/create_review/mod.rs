//! Pull request review submission

use super::pull_number_spec;
use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterKind, ParameterSpec, ValidationError};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{json, Map, Value};

const EVENTS: &[&str] = &["APPROVE", "REQUEST_CHANGES", "COMMENT"];

/// Tool for `POST /repos/{owner}/{repo}/pulls/{number}/reviews`
#[derive(Default)]
pub struct CreatePullRequestReviewTool;

impl CreatePullRequestReviewTool {
    /// Creates a new instance of the CreatePullRequestReviewTool
    pub fn new() -> Self {
        Self
    }

    /// One inline comment in the shape the API takes
    fn review_comment(index: usize, fields: &Arguments) -> Result<Value> {
        let binder = ParameterBinder::new(fields);
        let nested = |e: ValidationError| ValidationError::Invalid {
            parameter: "comments".into(),
            expected: ParameterKind::ObjectArray,
            reason: format!("comment {index}: {e}"),
        };

        let mut comment = Map::new();
        for field in ["path", "body"] {
            comment.insert(field.into(), json!(binder.require_string(field).map_err(nested)?));
        }
        for field in ["position", "line", "start_line"] {
            if let Some(value) = binder.optional_int_present(field).map_err(nested)? {
                comment.insert(field.into(), json!(value));
            }
        }
        for field in ["side", "start_side"] {
            if let Some(value) = binder.optional_string_present(field).map_err(nested)? {
                comment.insert(field.into(), json!(value));
            }
        }
        if !comment.contains_key("position") && !comment.contains_key("line") {
            return Err(nested(ValidationError::Missing {
                parameter: "position or line".into(),
                expected: ParameterKind::Integer,
            })
            .into());
        }
        Ok(Value::Object(comment))
    }
}

#[async_trait]
impl McpTool for CreatePullRequestReviewTool {
    fn name(&self) -> &'static str {
        "create_pull_request_review"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            RepoRef::specs(),
            [
                pull_number_spec(),
                ParameterSpec::string("event", "Review action to perform")
                    .required()
                    .one_of(EVENTS),
                ParameterSpec::string("body", "Review comment text"),
                ParameterSpec::string("commitId", "SHA of commit to review"),
                ParameterSpec::object_array("comments", "Line-specific comments on the diff"),
            ],
        )
    }

    fn mutating(&self) -> bool {
        true
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;
        let number = binder.require_int("pullNumber")?.to_string();

        let mut body = Map::new();
        body.insert("event".into(), json!(binder.require_string("event")?));
        let text = binder.optional_string("body")?;
        if !text.is_empty() {
            body.insert("body".into(), json!(text));
        }
        let commit = binder.optional_string("commitId")?;
        if !commit.is_empty() {
            body.insert("commit_id".into(), json!(commit));
        }
        let comments = binder
            .optional_object_array("comments")?
            .into_iter()
            .enumerate()
            .map(|(index, fields)| Self::review_comment(index, fields))
            .collect::<Result<Vec<_>>>()?;
        if !comments.is_empty() {
            body.insert("comments".into(), Value::Array(comments));
        }

        tracing::info!("Reviewing {}/{}#{}", repo.owner, repo.repo, number);
        let request = RestRequest::post(repo.segments(&["pulls", number.as_str(), "reviews"]))
            .json(Value::Object(body));
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

    #[tokio::test]
    async fn test_review_with_inline_comments() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_rest(Ok(json!({ "id": 80, "state": "CHANGES_REQUESTED" })));
        let args = json!({
            "owner": "acme",
            "repo": "widgets",
            "pullNumber": 6,
            "event": "REQUEST_CHANGES",
            "body": "A couple of things",
            "commitId": "ecdd80b",
            "comments": [
                { "path": "src/lib.rs", "body": "unused", "line": 12, "side": "RIGHT" },
                { "path": "README.md", "body": "typo", "position": 3 }
            ]
        });

        let result = CreatePullRequestReviewTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap();

        assert_eq!(result_json(&result)["id"], 80);
        let request = &api.rest_requests()[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path(), "/repos/acme/widgets/pulls/6/reviews");
        assert_eq!(
            request.body,
            Some(json!({
                "event": "REQUEST_CHANGES",
                "body": "A couple of things",
                "commit_id": "ecdd80b",
                "comments": [
                    { "path": "src/lib.rs", "body": "unused", "line": 12, "side": "RIGHT" },
                    { "path": "README.md", "body": "typo", "position": 3 }
                ]
            }))
        );
    }

    #[tokio::test]
    async fn test_comment_without_placement_is_rejected() {
        let api = Arc::new(MockGitHubApi::new());
        let args = json!({
            "owner": "acme",
            "repo": "widgets",
            "pullNumber": 6,
            "event": "COMMENT",
            "comments": [{ "path": "src/lib.rs", "body": "where?" }]
        });

        let err = CreatePullRequestReviewTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap_err();

        match err {
            GitHubMcpError::Validation(e) => {
                assert_eq!(e.parameter(), "comments");
                assert!(e.to_string().contains("comment 0"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(api.rest_requests().is_empty());
    }
}
