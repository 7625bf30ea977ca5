//! Code search

use super::order_spec;
use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::specs;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;

/// Tool for `GET /search/code`
#[derive(Default)]
pub struct SearchCodeTool;

impl SearchCodeTool {
    /// Creates a new instance of the SearchCodeTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SearchCodeTool {
    fn name(&self) -> &'static str {
        "search_code"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            [
                ParameterSpec::string("q", "Search query using GitHub code search syntax")
                    .required(),
                ParameterSpec::string("sort", "Sort field").one_of(&["indexed"]),
                order_spec(),
            ],
            ParameterSpec::pagination(),
        )
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let request = RestRequest::get(["search", "code"])
            .query("q", binder.require_string("q")?)
            .query_non_empty("sort", &binder.optional_string("sort")?)
            .query_non_empty("order", &binder.optional_string("order")?)
            .paginate(binder.pagination()?);

        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}
