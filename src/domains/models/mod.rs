//! Models domain module.
//!
//! This module owns everything about the upstream model API: the immutable
//! backend registry, the completion wire types, cost estimation, failure
//! classification, and the HTTP dispatcher itself.
//!
//! ## Architecture
//!
//! - `registry.rs` - Backend registry loaded once from JSON at start-up
//! - `dispatcher.rs` - `ModelDispatcher` trait used by the tool layer
//! - `service.rs` - HTTP implementation of the dispatcher
//! - `types.rs` - Upstream request/response types and the normalized result
//! - `pricing.rs` - Static rate table and cost estimate
//! - `error.rs` - Upstream failure classification

mod dispatcher;
mod error;
pub mod pricing;
mod registry;
mod service;
pub mod types;

#[cfg(test)]
pub(crate) use dispatcher::testing;

pub use dispatcher::ModelDispatcher;
pub use error::ModelError;
pub use registry::{BackendDescriptor, BackendMetadata, BackendRegistry, CostTier, RoutingPolicy};
pub use service::ModelService;
pub use types::{CompletionResult, Usage};
