//! Single code scanning alert

use crate::client::RestRequest;
use crate::mcp::params::{Arguments, ParameterBinder, ParameterSpec};
use crate::mcp::shared_utils::{specs, RepoRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::Result;
use async_trait::async_trait;
use rmcp::model::CallToolResult;

/// Tool for `GET /repos/{owner}/{repo}/code-scanning/alerts/{number}`
#[derive(Default)]
pub struct GetCodeScanningAlertTool;

impl GetCodeScanningAlertTool {
    /// Creates a new instance of the GetCodeScanningAlertTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetCodeScanningAlertTool {
    fn name(&self) -> &'static str {
        "get_code_scanning_alert"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        specs(
            RepoRef::specs(),
            [ParameterSpec::integer("alertNumber", "The number of the alert")
                .required()
                .with_minimum(1)],
        )
    }

    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult> {
        let binder = ParameterBinder::new(arguments);
        let repo = RepoRef::bind(&binder)?;
        let number = binder.require_int("alertNumber")?.to_string();

        let request =
            RestRequest::get(repo.segments(&["code-scanning", "alerts", number.as_str()]));
        let response = context.rest(request).await?;
        BaseToolImpl::json_response(&response.body)
    }
}
