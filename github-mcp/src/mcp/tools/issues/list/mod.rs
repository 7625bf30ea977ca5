//! Repository issue listing

use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;

/// Tool for listing a repository's issues
#[derive(Default)]
pub struct ListIssuesTool;

impl ListIssuesTool {
    /// Creates a new instance of the ListIssuesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListIssuesTool {
    fn name(&self) -> &'static str {
        "list_issues"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        let mut parameters = specs(
            RepoRef::specs(),
            [
                ParameterSpec::string("state", "Filter by state").one_of(&["open", "closed", "all"]),
                ParameterSpec::string_array("labels", "Filter by labels"),
                ParameterSpec::string("sort", "Sort order")
                    .one_of(&["created", "updated", "comments"]),
                ParameterSpec::string("direction", "Sort direction").one_of(&["asc", "desc"]),
                ParameterSpec::string("since", "Filter by date (ISO 8601 timestamp)"),
            ],
        );
        parameters.extend(ParameterSpec::pagination());
        parameters
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;
        let labels = binder.optional_string_array("labels")?.join(",");

        let request = RestRequest::get(repo.segments(&["issues"]))
            .query_non_empty("state", &binder.optional_string("state")?)
            .query_non_empty("labels", &labels)
            .query_non_empty("sort", &binder.optional_string("sort")?)
            .query_non_empty("direction", &binder.optional_string("direction")?)
            .query_non_empty("since", &binder.optional_string("since")?)
            .paginate(binder.pagination()?);

        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_context, MockGitHubApi};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_list_issues_builds_query() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_rest(Ok(json!([])));

        let args = json!({
            "owner": "acme",
            "repo": "widgets",
            "state": "closed",
            "labels": ["bug", "ui"],
            "perPage": 50
        });
        ListIssuesTool::new()
            .execute(args.as_object().unwrap(), &test_context(api.clone()))
            .await
            .unwrap();

        let request = &api.rest_requests()[0];
        assert_eq!(request.path(), "/repos/acme/widgets/issues");
        assert_eq!(request.query_value("state"), Some("closed"));
        assert_eq!(request.query_value("labels"), Some("bug,ui"));
        assert_eq!(request.query_value("sort"), None);
        assert_eq!(request.query_value("page"), Some("1"));
        assert_eq!(request.query_value("per_page"), Some("50"));
    }
}
