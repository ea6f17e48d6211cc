//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod call_external_model;

pub use call_external_model::{
    CallExternalModelParams, CallExternalModelTool, ExternalModelReply,
};
