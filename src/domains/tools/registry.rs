//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - Tool metadata for `tools/list`
//! - Name-based dispatch for `tools/call`, including argument validation

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{info, warn};

use crate::domains::models::ModelDispatcher;

use super::ToolError;
use super::definitions::{CallExternalModelParams, CallExternalModelTool};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    dispatcher: Arc<dyn ModelDispatcher>,
}

impl ToolRegistry {
    /// Create a new tool registry backed by the given dispatcher.
    pub fn new(dispatcher: Arc<dyn ModelDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![CallExternalModelTool::NAME]
    }

    /// Log the registered tools.
    pub fn log_tools(&self) {
        for name in self.tool_names() {
            info!("Registered tool: {}", name);
        }
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// Fixed at compile time; independent of which models are configured.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![CallExternalModelTool::to_tool()]
    }

    /// Dispatch a tool call to the appropriate handler.
    ///
    /// Unknown names and malformed arguments are rejected here, before any
    /// upstream request is made.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<&JsonObject>,
    ) -> Result<CallToolResult, ToolError> {
        match name {
            CallExternalModelTool::NAME => {
                let params = CallExternalModelParams::from_arguments(arguments).inspect_err(|e| {
                    warn!("Rejected {} call: {}", name, e);
                })?;
                CallExternalModelTool::execute(&params, self.dispatcher.as_ref()).await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .finish()
    }
}
