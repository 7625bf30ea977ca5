//! File and directory contents

use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{path_segments, specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;

/// Tool for `GET /repos/{owner}/{repo}/contents/{path}`
#[derive(Default)]
pub struct GetFileContentsTool;

impl GetFileContentsTool {
    /// Creates a new instance of the GetFileContentsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetFileContentsTool {
    fn name(&self) -> &'static str {
        "get_file_contents"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            RepoRef::specs(),
            [
                ParameterSpec::string("path", "Path to file or directory").required(),
                ParameterSpec::string("branch", "Branch to get contents from"),
            ],
        )
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;
        let path = binder.require_string("path")?;

        // Each path component is its own segment so that it gets encoded separately.
        let mut rest = vec!["contents"];
        rest.extend(path_segments("path", &path)?);

        let request = RestRequest::get(repo.segments(&rest))
            .query_non_empty("ref", &binder.optional_string("branch")?);
        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}
