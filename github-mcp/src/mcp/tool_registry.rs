//! Tool registry for MCP operations
//!
//! Tools are collected in a [`ToolRegistryBuilder`] at startup and then sealed
//! into an immutable [`ToolRegistry`]. Sealing consumes the builder, so no
//! tool can be added, removed or replaced once dispatch begins.
//!
//! A builder created in read-only mode silently skips every tool whose
//! [`McpTool::mutating`] returns `true`. Such a tool is therefore absent from
//! the sealed registry and a call to it fails exactly like a call to a name
//! that never existed.

use super::error_handling::McpErrorHandler;
use super::params::{schema_for, validate_specs, Arguments, ParameterSpec, ValidationError};
use crate::client::{ApiResponse, GitHubApi, GraphQlRequest, RestRequest};
use crate::identity::{AccountIdentity, AccountLookup, IdentityResolver, Session, Viewer};
use crate::rate_limit::RateLimitGuard;
use crate::{GitHubMcpError, Result};
use rmcp::model::{Annotated, CallToolRequestParam, CallToolResult, RawContent, RawTextContent, Tool};
use rmcp::Error as McpError;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Context shared by all tools during execution
///
/// Cloned per call with that call's cancellation token; everything else is
/// shared read-only.
#[derive(Clone)]
pub struct ToolContext {
    /// Outbound API
    pub api: Arc<dyn GitHubApi>,
    /// Retry policy applied to every outbound call
    pub guard: RateLimitGuard,
    /// Session state holding the caller's identity
    pub session: Arc<Session>,
    /// Login to node id resolution
    pub identity: Arc<IdentityResolver>,
    /// Cancellation signal of the current call
    pub cancel: CancellationToken,
    lookup: AccountLookup,
}

impl ToolContext {
    /// Create a new tool context with a fresh session
    pub fn new(api: Arc<dyn GitHubApi>, guard: RateLimitGuard) -> Self {
        let lookup = AccountLookup::new(api.clone(), guard.clone());
        Self {
            identity: Arc::new(IdentityResolver::standard(lookup.clone())),
            session: Arc::new(Session::new()),
            cancel: CancellationToken::new(),
            api,
            guard,
            lookup,
        }
    }

    /// Replace the session
    pub fn with_session(mut self, session: Arc<Session>) -> Self {
        self.session = session;
        self
    }

    /// Replace the identity resolver
    pub fn with_identity_resolver(mut self, identity: Arc<IdentityResolver>) -> Self {
        self.identity = identity;
        self
    }

    /// A copy of this context bound to a call's cancellation token
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            cancel,
            ..self.clone()
        }
    }

    /// REST call wrapped by the rate-limit guard
    pub async fn rest(&self, request: RestRequest) -> Result<ApiResponse> {
        self.guard
            .execute(&self.cancel, || self.api.rest(request.clone()))
            .await
    }

    /// GraphQL call wrapped by the rate-limit guard
    pub async fn graphql(&self, request: GraphQlRequest) -> Result<ApiResponse> {
        self.guard
            .execute(&self.cancel, || self.api.graphql(request.clone()))
            .await
    }

    /// The authenticated caller, fetched once per session
    pub async fn viewer(&self) -> Result<Viewer> {
        self.session.viewer(&self.lookup, &self.cancel).await
    }

    /// Resolve a login to a user or organization identity
    pub async fn resolve_account(&self, login: &str) -> Result<AccountIdentity> {
        let viewer = self.viewer().await?;
        self.identity.resolve(login, &viewer, &self.cancel).await
    }
}

/// Trait defining the interface for all MCP tools
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's name
    fn name(&self) -> &'static str;

    /// Get the tool's description
    fn description(&self) -> &'static str;

    /// Declared parameters, in schema order
    fn parameters(&self) -> Vec<ParameterSpec>;

    /// Whether the tool changes state on GitHub
    fn mutating(&self) -> bool {
        false
    }

    /// Execute the tool with the given arguments and context
    async fn execute(&self, arguments: &Arguments, context: &ToolContext) -> Result<CallToolResult>;
}

/// Static description of a registered tool
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    /// Tool name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Declared parameters, in order
    pub parameters: Vec<ParameterSpec>,
    /// Whether the tool changes state on GitHub
    pub mutating: bool,
}

impl ToolDescriptor {
    fn of(tool: &dyn McpTool) -> Self {
        Self {
            name: tool.name(),
            description: tool.description(),
            parameters: tool.parameters(),
            mutating: tool.mutating(),
        }
    }

    /// JSON schema of the tool's input
    pub fn schema(&self) -> serde_json::Value {
        schema_for(&self.parameters)
    }

    /// Enforce declared bounds and allowed values
    pub fn check_constraints(
        &self,
        arguments: &Arguments,
    ) -> std::result::Result<(), ValidationError> {
        self.parameters
            .iter()
            .try_for_each(|spec| spec.check_constraints(arguments))
    }

    /// MCP representation used by `tools/list`
    pub fn to_tool(&self) -> Tool {
        let schema_map = match self.schema() {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };

        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: Arc::new(schema_map),
            annotations: None,
        }
    }
}

/// A tool invocation as received from the transport
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    /// Requested tool
    pub name: String,
    /// Untyped arguments
    pub arguments: Arguments,
}

impl ToolCall {
    /// Create a call
    pub fn new(name: impl Into<String>, arguments: Arguments) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

impl From<CallToolRequestParam> for ToolCall {
    fn from(request: CallToolRequestParam) -> Self {
        Self {
            name: request.name.to_string(),
            arguments: request.arguments.unwrap_or_default(),
        }
    }
}

struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: Box<dyn McpTool>,
}

/// Registry in the building state
#[derive(Default)]
pub struct ToolRegistryBuilder {
    read_only: bool,
    tools: Vec<RegisteredTool>,
    skipped: Vec<&'static str>,
}

impl ToolRegistryBuilder {
    /// Create a builder; in read-only mode mutating tools are skipped
    pub fn new(read_only: bool) -> Self {
        Self {
            read_only,
            ..Default::default()
        }
    }

    /// Register a tool in the registry
    ///
    /// Fails on a duplicate tool name or inconsistent parameter declarations.
    /// Returns `Ok(false)` when the tool was skipped by read-only mode.
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) -> Result<bool> {
        let descriptor = ToolDescriptor::of(&tool);

        validate_specs(&descriptor.parameters).map_err(|reason| {
            GitHubMcpError::Registration(format!("tool '{}': {reason}", descriptor.name))
        })?;

        if self.tools.iter().any(|t| t.descriptor.name == descriptor.name)
            || self.skipped.contains(&descriptor.name)
        {
            return Err(GitHubMcpError::Registration(format!(
                "tool '{}' is already registered",
                descriptor.name
            )));
        }

        if self.read_only && descriptor.mutating {
            tracing::debug!("Read-only mode: skipping mutating tool {}", descriptor.name);
            self.skipped.push(descriptor.name);
            return Ok(false);
        }

        self.tools.push(RegisteredTool {
            descriptor,
            handler: Box::new(tool),
        });
        Ok(true)
    }

    /// Whether mutating tools are being skipped
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Number of tools registered so far
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if no tool has been registered
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Freeze the registry for dispatch
    pub fn seal(self) -> ToolRegistry {
        let index = self
            .tools
            .iter()
            .enumerate()
            .map(|(position, tool)| (tool.descriptor.name, position))
            .collect();
        tracing::debug!(
            "Sealed tool registry with {} tools ({} skipped)",
            self.tools.len(),
            self.skipped.len()
        );
        ToolRegistry {
            read_only: self.read_only,
            tools: self.tools,
            index,
        }
    }
}

/// Sealed, dispatch-only registry of MCP tools
pub struct ToolRegistry {
    read_only: bool,
    tools: Vec<RegisteredTool>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Start building a registry
    pub fn builder(read_only: bool) -> ToolRegistryBuilder {
        ToolRegistryBuilder::new(read_only)
    }

    fn entry(&self, name: &str) -> Result<&RegisteredTool> {
        self.index
            .get(name)
            .map(|&position| &self.tools[position])
            .ok_or_else(|| GitHubMcpError::UnknownTool(name.to_string()))
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Result<&dyn McpTool> {
        self.entry(name).map(|tool| tool.handler.as_ref())
    }

    /// Get a tool's descriptor by name
    pub fn descriptor(&self, name: &str) -> Result<&ToolDescriptor> {
        self.entry(name).map(|tool| &tool.descriptor)
    }

    /// List all registered tool names, in registration order
    pub fn list_tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|tool| tool.descriptor.name).collect()
    }

    /// Get all registered tools as Tool objects for MCP list_tools response
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools
            .iter()
            .map(|tool| tool.descriptor.to_tool())
            .collect()
    }

    /// Whether the registry was built in read-only mode
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Look up the tool, enforce declared constraints and run it
    pub async fn dispatch(&self, call: &ToolCall, context: &ToolContext) -> Result<CallToolResult> {
        let tool = self.entry(&call.name)?;
        tool.descriptor.check_constraints(&call.arguments)?;
        tracing::debug!("Dispatching tool {}", call.name);
        tool.handler.execute(&call.arguments, context).await
    }

    /// Dispatch and translate failures into tool-error results or protocol errors
    pub async fn call_tool(
        &self,
        call: &ToolCall,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        McpErrorHandler::into_call_result(self.dispatch(call, context).await, &call.name)
    }
}

/// Base implementation providing common utility methods for MCP tools
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Create a success response with the given text
    pub fn create_success_response<T: Into<String>>(content: T) -> CallToolResult {
        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent {
                    text: content.into(),
                }),
                None,
            )],
            is_error: Some(false),
        }
    }

    /// Create a success response holding compact JSON
    pub fn json_response<T: Serialize>(value: &T) -> Result<CallToolResult> {
        Ok(Self::create_success_response(serde_json::to_string(value)?))
    }

    /// Create an error response with the given error message
    ///
    /// # Arguments
    ///
    /// * `error` - The error message
    /// * `details` - Optional additional details
    pub fn create_error_response<T: Into<String>>(
        error: T,
        details: Option<String>,
    ) -> CallToolResult {
        let error_text = match details {
            Some(details) => format!("{}: {}", error.into(), details),
            None => error.into(),
        };

        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent { text: error_text }),
                None,
            )],
            is_error: Some(true),
        }
    }
}
