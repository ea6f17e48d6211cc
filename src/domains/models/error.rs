//! Model dispatch error types.
//!
//! Upstream failures are classified by HTTP status so the tool layer can
//! report them without knowing anything about the HTTP client.

use serde_json::Value;
use thiserror::Error;

/// Longest raw upstream body, in characters, carried into an error message.
const MAX_RAW_BODY_CHARS: usize = 500;

/// Errors that can occur while dispatching a completion request.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The requested model name has no entry in the backend registry.
    #[error("Model \"{0}\" is not supported")]
    UnsupportedModel(String),

    /// The upstream rejected the bearer token (401/403).
    #[error("Authentication failed with upstream model API (status {status}): {message}")]
    Authentication { status: u16, message: String },

    /// The upstream is throttling requests (429).
    #[error("Rate limit exceeded by upstream model API, retry later: {message}")]
    RateLimited { message: String },

    /// The upstream failed internally (5xx).
    #[error("Upstream model API server error (status {status}): {message}")]
    ServerError { status: u16, message: String },

    /// Any other non-success status.
    #[error("API Error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The upstream answered with a success status but an unreadable body.
    #[error("Invalid response from upstream model API: {0}")]
    InvalidResponse(String),

    /// Network-level failure; carries the HTTP client's own message.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl ModelError {
    /// Create a new "unsupported model" error.
    pub fn unsupported_model(name: impl Into<String>) -> Self {
        Self::UnsupportedModel(name.into())
    }

    /// Create a new "invalid response" error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Classify a non-success upstream response.
    ///
    /// The message is taken from `error.message` in a JSON body when present,
    /// otherwise from the raw body, otherwise from the status itself.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = upstream_message(body).unwrap_or_else(|| format!("HTTP {}", status));

        match status {
            401 | 403 => Self::Authentication { status, message },
            429 => Self::RateLimited { message },
            s if s >= 500 => Self::ServerError { status, message },
            _ => Self::Api { status, message },
        }
    }

    /// Whether this failure came from an upstream HTTP status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. }
            | Self::ServerError { status, .. }
            | Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::UnsupportedModel(_) | Self::InvalidResponse(_) => None,
        }
    }
}

/// Extract a human-readable message from an upstream error body.
fn upstream_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(body) {
        Ok(json) => json
            .pointer("/error/message")
            .and_then(Value::as_str)
            .or_else(|| json.get("error").and_then(Value::as_str))
            .or_else(|| json.get("message").and_then(Value::as_str))
            .map(str::to_string)
            .or_else(|| Some(truncate_body(body))),
        Err(_) => Some(truncate_body(body)),
    }
}

/// Cap a raw upstream body at [`MAX_RAW_BODY_CHARS`] characters.
fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_RAW_BODY_CHARS) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}
