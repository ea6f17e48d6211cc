//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Central tool registry: listing and name-based dispatch
//! - `error.rs` - Protocol-level tool errors
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define params, `from_arguments()`, `execute()` and `to_tool()`
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `registry.rs` (`tool_names`, `get_all_tools`, `call_tool`)
//!
//! **No need to modify `server.rs`!**

pub mod definitions;
mod error;
mod registry;

pub use error::ToolError;
pub use registry::ToolRegistry;
