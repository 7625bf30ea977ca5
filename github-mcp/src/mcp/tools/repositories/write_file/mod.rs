//! Single-file commits through the contents API

use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{path_segments, specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rmcp::model::CallToolResult;
use serde_json::{json, Value};

/// Tool for `PUT /repos/{owner}/{repo}/contents/{path}`
#[derive(Default)]
pub struct CreateOrUpdateFileTool;

impl CreateOrUpdateFileTool {
    /// Creates a new instance of the CreateOrUpdateFileTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateOrUpdateFileTool {
    fn name(&self) -> &'static str {
        "create_or_update_file"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            RepoRef::specs(),
            [
                ParameterSpec::string("path", "Path where to create/update the file").required(),
                ParameterSpec::string("content", "Content of the file").required(),
                ParameterSpec::string("message", "Commit message").required(),
                ParameterSpec::string("branch", "Branch to create/update the file in").required(),
                ParameterSpec::string("sha", "SHA of file being replaced (for updates)"),
            ],
        )
    }

    fn mutating(&self) -> bool {
        true
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;
        let path = binder.require_string("path")?;
        let mut rest = vec!["contents"];
        rest.extend(path_segments("path", &path)?);

        // an empty file is a legitimate commit
        let content = binder.optional_string("content")?;
        let mut body = json!({
            "message": binder.require_string("message")?,
            "content": STANDARD.encode(content.as_bytes()),
            "branch": binder.require_string("branch")?,
        });
        let sha = binder.optional_string("sha")?;
        if !sha.is_empty() {
            body["sha"] = Value::String(sha);
        }

        tracing::info!("Writing {} in {}/{}", path, repo.owner, repo.repo);
        let request = RestRequest::put(repo.segments(&rest)).json(body);
        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{result_json, test_context, MockGitHubApi};
    use reqwest::Method;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_update_encodes_content() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_rest(Ok(json!({ "commit": { "sha": "7638417" } })));
        let args = json!({
            "owner": "acme",
            "repo": "widgets",
            "path": "docs/hello.txt",
            "content": "hello world",
            "message": "Say hello",
            "branch": "main",
            "sha": "95b966a"
        });

        let result = CreateOrUpdateFileTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap();

        assert_eq!(result_json(&result)["commit"]["sha"], "7638417");
        let request = &api.rest_requests()[0];
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path(), "/repos/acme/widgets/contents/docs/hello.txt");
        assert_eq!(
            request.body,
            Some(json!({
                "message": "Say hello",
                "content": "aGVsbG8gd29ybGQ=",
                "branch": "main",
                "sha": "95b966a"
            }))
        );
    }

    #[tokio::test]
    async fn test_escaping_path_is_rejected() {
        let api = Arc::new(MockGitHubApi::new());
        let args = json!({
            "owner": "acme",
            "repo": "widgets",
            "path": "docs/../../etc/passwd",
            "content": "x",
            "message": "m",
            "branch": "main"
        });

        let err = CreateOrUpdateFileTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("parameter path"));
        assert!(api.rest_requests().is_empty());
    }
}
