//! Domains module containing business logic organized by bounded contexts.
//!
//! - **models**: the backend registry and the upstream model dispatcher
//! - **tools**: the MCP tool surface exposed to clients

pub mod models;
pub mod tools;
