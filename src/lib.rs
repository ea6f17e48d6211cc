//! Coding Conversations MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing a single
//! tool, `call_external_model`, which forwards a question to an external AI
//! model over an OpenAI-style chat completions API and returns its answer.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server handler and the
//!   stdio transport
//! - **domains**: Business logic organized by domains
//!   - **models**: Backend registry, completion requests, cost estimation
//!   - **tools**: The MCP tool surface and argument validation
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use coding_conversations_mcp::core::{Config, McpServer, StdioTransport};
//! use coding_conversations_mcp::domains::models::{BackendRegistry, ModelService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let registry = BackendRegistry::load(&config.models.config_path)?;
//!     let service = ModelService::new(Arc::new(registry))?;
//!     let server = McpServer::new(config, Arc::new(service));
//!     StdioTransport::run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, McpServer, Result};
