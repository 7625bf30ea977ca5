//! Code scanning alert listing

use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;

/// Tool for `GET /repos/{owner}/{repo}/code-scanning/alerts`
#[derive(Default)]
pub struct ListCodeScanningAlertsTool;

impl ListCodeScanningAlertsTool {
    /// Creates a new instance of the ListCodeScanningAlertsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListCodeScanningAlertsTool {
    fn name(&self) -> &'static str {
        "list_code_scanning_alerts"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            RepoRef::specs(),
            [
                ParameterSpec::string("ref", "The Git reference for the results you want to list"),
                ParameterSpec::string("state", "State of the code scanning alerts to list")
                    .one_of(&["open", "closed", "dismissed", "fixed"]),
                ParameterSpec::string("severity", "Only show alerts with this severity")
                    .one_of(&["critical", "high", "medium", "low", "warning", "note", "error"]),
                ParameterSpec::string("tool_name", "The name of the tool used for code scanning"),
            ]
            .into_iter()
            .chain(ParameterSpec::pagination()),
        )
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;

        let mut request = RestRequest::get(repo.segments(&["code-scanning", "alerts"]));
        for field in ["ref", "state", "severity", "tool_name"] {
            request = request.query_non_empty(field, &binder.optional_string(field)?);
        }
        let response = context
            .rest(request.paginate(binder.pagination()?))
            .await?;
        BaseToolImpl::json_response(&response.body)
    }
}
