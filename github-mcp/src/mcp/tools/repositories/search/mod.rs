//! Repository search

use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::specs;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;

/// Tool for `GET /search/repositories`
#[derive(Default)]
pub struct SearchRepositoriesTool;

impl SearchRepositoriesTool {
    /// Creates a new instance of the SearchRepositoriesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SearchRepositoriesTool {
    fn name(&self) -> &'static str {
        "search_repositories"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            [ParameterSpec::string("query", "Search query").required()],
            ParameterSpec::pagination(),
        )
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let request = RestRequest::get(["search", "repositories"])
            .query("q", binder.require_string("query")?)
            .paginate(binder.pagination()?);

        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}
