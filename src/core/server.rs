//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tool registry.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and dispatched by name through `domains/tools/registry.rs`.
//! `tools/list` and `tools/call` are implemented here directly rather than
//! through a generated router, so that an unknown tool name surfaces as a
//! `METHOD_NOT_FOUND` protocol error.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::models::ModelDispatcher;
use crate::domains::tools::ToolRegistry;

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. Cloning is
/// cheap; every clone shares the same configuration and tool registry.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registry used to list and dispatch tools.
    tools: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration and dispatcher.
    pub fn new(config: Config, dispatcher: Arc<dyn ModelDispatcher>) -> Self {
        let tools = ToolRegistry::new(dispatcher);
        tools.log_tools();

        Self {
            config: Arc::new(config),
            tools: Arc::new(tools),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the tool registry.
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Use call_external_model to consult an external AI model on coding questions. \
                 Omit `model` to use the configured default."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: ToolRegistry::get_all_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        self.tools
            .call_tool(&request.name, request.arguments.as_ref())
            .await
            .map_err(McpError::from)
    }
}
