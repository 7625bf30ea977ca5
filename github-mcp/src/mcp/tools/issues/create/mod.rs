//! Issue creation tool for MCP operations

use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{json, Map, Value};

/// Tool for creating new issues
#[derive(Default)]
pub struct CreateIssueTool;

impl CreateIssueTool {
    /// Creates a new instance of the CreateIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateIssueTool {
    fn name(&self) -> &'static str {
        "create_issue"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            RepoRef::specs(),
            [
                ParameterSpec::string("title", "Issue title").required(),
                ParameterSpec::string("body", "Issue body content"),
                ParameterSpec::string_array("assignees", "Usernames to assign to this issue"),
                ParameterSpec::string_array("labels", "Labels to apply to this issue"),
                ParameterSpec::integer("milestone", "Milestone number").with_minimum(1),
            ],
        )
    }

    fn mutating(&self) -> bool {
        true
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;

        let mut body = Map::new();
        body.insert("title".into(), json!(binder.require_string("title")?));
        body.insert("body".into(), json!(binder.optional_string("body")?));
        body.insert("assignees".into(), json!(binder.optional_string_array("assignees")?));
        body.insert("labels".into(), json!(binder.optional_string_array("labels")?));
        if let Some(milestone) = binder.optional_int_present("milestone")? {
            body.insert("milestone".into(), json!(milestone));
        }

        tracing::debug!("Creating issue in {}/{}", repo.owner, repo.repo);
        let response = context
            .rest(RestRequest::post(repo.segments(&["issues"])).json(Value::Object(body)))
            .await?;
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
    async fn test_create_issue_posts_body() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_rest(Ok(json!({ "number": 12, "html_url": "https://github.com/acme/widgets/issues/12" })));

        let args = json!({
            "owner": "acme",
            "repo": "widgets",
            "title": "Crash on start",
            "labels": ["bug"]
        });
        let result = CreateIssueTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap();

        assert_eq!(result_json(&result)["number"], 12);
        let request = &api.rest_requests()[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path(), "/repos/acme/widgets/issues");
        let body = request.body.as_ref().unwrap();
        assert_eq!(body["title"], "Crash on start");
        assert_eq!(body["labels"], json!(["bug"]));
        assert!(body.get("milestone").is_none());
    }

    #[test]
    fn test_create_issue_is_mutating() {
        assert!(CreateIssueTool::new().mutating());
    }
}
