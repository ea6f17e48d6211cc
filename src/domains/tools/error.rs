//! Tool-specific error types.
//!
//! These are the protocol-level failures raised before any dispatch. Failures
//! from the model backend are reported inside a tool result instead.

use rmcp::{ErrorData as McpError, model::ErrorCode};
use thiserror::Error;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("{0}")]
    InvalidArguments(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        let message = err.to_string();
        match err {
            ToolError::NotFound(_) => McpError::new(ErrorCode::METHOD_NOT_FOUND, message, None),
            ToolError::InvalidArguments(_) => McpError::invalid_params(message, None),
            ToolError::Internal(_) => McpError::internal_error(message, None),
        }
    }
}
