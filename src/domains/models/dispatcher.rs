//! The seam between the tool layer and the upstream model API.

use super::error::ModelError;
use super::types::CompletionResult;

/// Something that can answer a single completion request.
///
/// The production implementation is [`ModelService`](super::ModelService);
/// tests substitute stubs to observe what the tool layer forwards.
#[async_trait::async_trait]
pub trait ModelDispatcher: Send + Sync {
    /// Send `message` to the backend named `model` (or the routing default).
    ///
    /// `context`, when present, replaces the default system prompt.
    async fn call_external_model(
        &self,
        model: Option<&str>,
        message: &str,
        context: Option<&str>,
    ) -> Result<CompletionResult, ModelError>;
}
