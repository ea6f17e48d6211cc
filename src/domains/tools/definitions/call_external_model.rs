//! External model tool definition.
//!
//! Forwards a message (plus optional system context) to one of the configured
//! upstream models and returns its answer as a JSON text block.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::domains::models::{CompletionResult, ModelDispatcher, Usage};
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the external model tool.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct CallExternalModelParams {
    /// Target model name.
    #[serde(default)]
    #[schemars(description = "Target model name (e.g., \"o3-mini\", \"gemini\")")]
    pub model: Option<String>,

    /// The message to send.
    #[schemars(description = "The message or query to send to the external model")]
    pub message: String,

    /// Replacement system prompt.
    #[serde(default)]
    #[schemars(description = "Optional additional context or system message")]
    pub context: Option<String>,
}

impl CallExternalModelParams {
    /// Narrow an untyped argument bag into typed parameters.
    ///
    /// `message` must be a non-empty string. `model` and `context` are kept
    /// only when they are non-empty strings; anything else is dropped.
    pub fn from_arguments(arguments: Option<&JsonObject>) -> Result<Self, ToolError> {
        let missing =
            || ToolError::invalid_arguments("Missing or invalid required parameter: message");

        let arguments = arguments.ok_or_else(missing)?;

        let message = arguments
            .get("message")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(missing)?
            .to_string();

        let optional_string = |key: &str| {
            arguments
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Ok(Self {
            model: optional_string("model"),
            message,
            context: optional_string("context"),
        })
    }
}

// ============================================================================
// Structured Output
// ============================================================================

/// JSON document returned to the caller on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalModelReply {
    pub response: String,
    pub model_used: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl From<CompletionResult> for ExternalModelReply {
    fn from(result: CompletionResult) -> Self {
        Self {
            response: result.text,
            model_used: result.model_used,
            usage: result.usage,
        }
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// External model tool - consults an upstream AI model.
pub struct CallExternalModelTool;

impl CallExternalModelTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "call_external_model";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Call an external AI model for code-related tasks and consulting";

    /// Execute the tool logic.
    ///
    /// Dispatcher failures come back as an error result, never as `Err`; the
    /// only `Err` is a failure to serialize the reply.
    #[instrument(skip_all, fields(model = params.model.as_deref().unwrap_or("<default>")))]
    pub async fn execute(
        params: &CallExternalModelParams,
        dispatcher: &dyn ModelDispatcher,
    ) -> Result<CallToolResult, ToolError> {
        info!("External model tool called");

        let result = dispatcher
            .call_external_model(
                params.model.as_deref(),
                &params.message,
                params.context.as_deref(),
            )
            .await;

        match result {
            Ok(result) => {
                info!("Response received from {}", result.model_used);
                let reply = ExternalModelReply::from(result);
                let text = serde_json::to_string_pretty(&reply)
                    .map_err(|e| ToolError::internal(e.to_string()))?;
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => {
                error!("Error processing request: {}", e);
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error: {}",
                    e
                ))]))
            }
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CallExternalModelParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
