//! Error types for server start-up.
//!
//! Per-request failures live in the domain error types (`ToolError`,
//! `ModelError`). This module holds the unified error used while the server
//! is being assembled: reading the models file, validating it and building the
//! upstream HTTP client. Any of these is fatal to process start.

use std::path::PathBuf;

use thiserror::Error;

/// A specialized Result type for server start-up operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the models domain.
    #[error("Model error: {0}")]
    Model(#[from] crate::domains::models::ModelError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The models configuration file could not be read.
    #[error("Failed to read models configuration {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a configuration file read error.
    pub fn config_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigFile {
            path: path.into(),
            source,
        }
    }
}
