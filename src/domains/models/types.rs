//! Wire types for the upstream chat completions API and the normalized result.

use serde::{Deserialize, Serialize};

/// System prompt used when the caller supplies no context.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful coding assistant. Provide concise, accurate responses.";

/// Upper bound on generated tokens per request.
pub const MAX_OUTPUT_TOKENS: u32 = 1000;

/// Sampling temperature for every request.
pub const TEMPERATURE: f64 = 0.7;

/// Text returned when the upstream payload carries no message content.
pub const NO_RESPONSE_TEXT: &str = "No response received";

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request body sent to the upstream completions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl CompletionRequest {
    /// Build a two-message request for the given upstream model.
    ///
    /// `context` becomes the system message; when absent the default coding
    /// assistant prompt is used instead.
    pub fn new(model_id: &str, message: &str, context: Option<&str>) -> Self {
        Self {
            model: model_id.to_string(),
            messages: vec![
                ChatMessage::system(context.unwrap_or(DEFAULT_SYSTEM_PROMPT)),
                ChatMessage::user(message),
            ],
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

/// Token accounting as reported by the upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct UpstreamUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// Usage metadata returned to the tool caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    /// Approximate cost in USD; advisory only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
}

/// Normalized outcome of a successful dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResult {
    /// The model's answer.
    pub text: String,

    /// Caller-facing model name that served the request.
    pub model_used: String,

    pub usage: Option<Usage>,
}
