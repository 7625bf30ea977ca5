//! User search

use super::order_spec;
use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::specs;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;

/// Tool for `GET /search/users`
#[derive(Default)]
pub struct SearchUsersTool;

impl SearchUsersTool {
    /// Creates a new instance of the SearchUsersTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SearchUsersTool {
    fn name(&self) -> &'static str {
        "search_users"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            [
                ParameterSpec::string("q", "Search query using GitHub users search syntax")
                    .required(),
                ParameterSpec::string("sort", "Sort field")
                    .one_of(&["followers", "repositories", "joined"]),
                order_spec(),
            ],
            ParameterSpec::pagination(),
        )
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let request = RestRequest::get(["search", "users"])
            .query("q", binder.require_string("q")?)
            .query_non_empty("sort", &binder.optional_string("sort")?)
            .query_non_empty("order", &binder.optional_string("order")?)
            .paginate(binder.pagination()?);

        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}
