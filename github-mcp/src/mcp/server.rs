//! MCP server implementation exposing the GitHub tool catalogue

use super::tool_registry::{ToolCall, ToolContext, ToolRegistry};
use super::tools::build_registry;
use crate::client::{GitHubApi, HttpGitHubClient};
use crate::config::Config;
use crate::rate_limit::RateLimitGuard;
use crate::Result;
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler};
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Name reported to clients during initialization
pub const SERVER_NAME: &str = "github-mcp-server";

const INSTRUCTIONS: &str = "GitHub tools for issues, pull requests, repositories, code and user search, code scanning alerts, and Projects (v2). \
Call get_me to learn who you are acting as and diagnose_github_mcp when calls fail with permission errors. \
Project mutations take node ids; get_project_v2 and list_project_v2_items return them.";

/// MCP server for GitHub operations
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    tool_context: ToolContext,
}

impl fmt::Debug for McpServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("McpServer")
            .field("tools", &self.tool_registry.len())
            .field("read_only", &self.tool_registry.is_read_only())
            .finish_non_exhaustive()
    }
}

impl McpServer {
    /// Create a server talking to GitHub over HTTP
    pub fn new(config: &Config) -> Result<Self> {
        let client = HttpGitHubClient::new(config)?;
        Self::with_api(Arc::new(client), config)
    }

    /// Create a server over any [`GitHubApi`] implementation
    pub fn with_api(api: Arc<dyn GitHubApi>, config: &Config) -> Result<Self> {
        let registry = build_registry(config.read_only)?;
        tracing::info!(
            "Registered {} tools{}",
            registry.len(),
            if registry.is_read_only() { " (read-only)" } else { "" }
        );
        let context = ToolContext::new(api, RateLimitGuard::from_config(config));
        Ok(Self::from_parts(registry, context))
    }

    /// Assemble a server from a sealed registry and a tool context
    pub fn from_parts(registry: ToolRegistry, context: ToolContext) -> Self {
        Self {
            tool_registry: Arc::new(registry),
            tool_context: context,
        }
    }

    /// The sealed tool registry
    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Run one tool call under the given cancellation token
    pub async fn call(
        &self,
        call: ToolCall,
        cancel: CancellationToken,
    ) -> std::result::Result<CallToolResult, McpError> {
        let context = self.tool_context.with_cancellation(cancel);
        self.tool_registry.call_tool(&call, &context).await
    }
}

impl ServerHandler for McpServer {
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        self.call(ToolCall::from(request), context.ct).await
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities {
                prompts: None,
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                resources: None,
                logging: None,
                completions: None,
                experimental: None,
            },
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: crate::VERSION.into(),
            },
            instructions: Some(INSTRUCTIONS.into()),
        }
    }
}
