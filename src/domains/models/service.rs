//! Model service - forwards completion requests to the configured upstream.
//!
//! One call maps to exactly one HTTP POST. There is no retry, no timeout
//! beyond the HTTP client's defaults, and no state besides the read-only
//! registry and the pooled client.

use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use super::dispatcher::ModelDispatcher;
use super::error::ModelError;
use super::pricing::usage_with_cost;
use super::registry::BackendRegistry;
use super::types::{CompletionRequest, CompletionResult, NO_RESPONSE_TEXT, UpstreamUsage};
use crate::core::Result;

/// HTTP-backed [`ModelDispatcher`].
#[derive(Debug, Clone)]
pub struct ModelService {
    registry: Arc<BackendRegistry>,
    client: Client,
}

impl ModelService {
    /// Create a new service over the given registry.
    pub fn new(registry: Arc<BackendRegistry>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ModelError::from)?;

        info!(
            "Initializing ModelService with {} backend(s)",
            registry.model_names().len()
        );

        Ok(Self { registry, client })
    }

    /// Turn an upstream success body into a [`CompletionResult`].
    fn normalize(body: &Value, model_used: &str, model_id: &str) -> CompletionResult {
        let text = body
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                warn!("Upstream response had no message content");
                NO_RESPONSE_TEXT.to_string()
            });

        let usage = body
            .get("usage")
            .filter(|usage| usage.is_object())
            .and_then(|usage| {
                serde_json::from_value::<UpstreamUsage>(usage.clone())
                    .inspect_err(|e| warn!("Ignoring malformed upstream usage: {}", e))
                    .ok()
            })
            .map(|usage| usage_with_cost(model_id, usage));

        CompletionResult {
            text,
            model_used: model_used.to_string(),
            usage,
        }
    }
}

#[async_trait::async_trait]
impl ModelDispatcher for ModelService {
    #[instrument(skip(self, message, context), fields(model = model.unwrap_or("<default>")))]
    async fn call_external_model(
        &self,
        model: Option<&str>,
        message: &str,
        context: Option<&str>,
    ) -> std::result::Result<CompletionResult, ModelError> {
        let (model_used, backend) = self.registry.resolve(model).inspect_err(|e| {
            warn!("{}", e);
        })?;

        let request = CompletionRequest::new(&backend.model_id, message, context);
        info!(
            "Calling {} ({}) at {}",
            model_used, backend.model_id, backend.endpoint
        );

        let response = self
            .client
            .post(&backend.endpoint)
            .bearer_auth(&backend.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Error calling external model: {}", e);
                ModelError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = ModelError::from_status(status.as_u16(), &body);
            error!(status = ?err.status(), "Error calling external model: {}", err);
            return Err(err);
        }

        let json: Value = serde_json::from_str(&body).map_err(|e| {
            error!("Upstream returned a non-JSON body: {}", e);
            ModelError::invalid_response(e.to_string())
        })?;

        let result = Self::normalize(&json, model_used, &backend.model_id);
        debug!(usage = ?result.usage, "Completion received");

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::models::registry::{BackendDescriptor, RoutingPolicy};
    use serde_json::json;
    use std::collections::HashMap;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COMPLETIONS_PATH: &str = "/api/v1/chat/completions";

    fn backend(server: &MockServer, model_id: &str, token: &str) -> BackendDescriptor {
        BackendDescriptor {
            endpoint: format!("{}{}", server.uri(), COMPLETIONS_PATH),
            model_id: model_id.to_string(),
            token: token.to_string(),
            metadata: None,
        }
    }

    fn service_for(server: &MockServer) -> ModelService {
        let mut models = HashMap::new();
        models.insert("o3-mini".to_string(), backend(server, "openai/o3-mini", "sk-o3"));
        models.insert(
            "gemini".to_string(),
            backend(server, "google/gemini-2.0-flash-001", "sk-gemini"),
        );
        let registry = BackendRegistry::new(
            models,
            RoutingPolicy {
                default_model: "o3-mini".to_string(),
            },
        )
        .unwrap();
        ModelService::new(Arc::new(registry)).unwrap()
    }

    fn completion(content: &str) -> Value {
        json!({
            "id": "gen-1",
            "choices": [{
                "index": 0,
                "finish_reason": "stop",
                "message": { "role": "assistant", "content": content }
            }],
            "usage": { "prompt_tokens": 100, "completion_tokens": 50, "total_tokens": 150 }
        })
    }

    #[tokio::test]
    async fn test_success_with_usage_and_cost() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .and(header("Authorization", "Bearer sk-o3"))
            .and(body_partial_json(json!({
                "model": "openai/o3-mini",
                "max_tokens": 1000,
                "messages": [
                    { "role": "system", "content": "Working on a tree library" },
                    { "role": "user", "content": "How do I store a large tree?" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("Use an arena.")))
            .expect(1)
            .mount(&server)
            .await;

        let service = service_for(&server);
        let result = service
            .call_external_model(
                Some("o3-mini"),
                "How do I store a large tree?",
                Some("Working on a tree library"),
            )
            .await
            .unwrap();

        assert_eq!(result.text, "Use an arena.");
        assert_eq!(result.model_used, "o3-mini");
        let usage = result.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 100);
        assert_eq!(usage.completion_tokens, 50);
        assert_eq!(usage.total_tokens, 150);
        // 100 * 1.1/M + 50 * 4.4/M
        assert!((usage.estimated_cost.unwrap() - 0.00033).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_default_model_is_used() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "model": "openai/o3-mini" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let result = service_for(&server)
            .call_external_model(None, "hello", None)
            .await
            .unwrap();
        assert_eq!(result.model_used, "o3-mini");
    }

    #[tokio::test]
    async fn test_upstream_model_id_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("Authorization", "Bearer sk-gemini"))
            .and(body_partial_json(json!({ "model": "google/gemini-2.0-flash-001" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let result = service_for(&server)
            .call_external_model(Some("gemini"), "hello", None)
            .await
            .unwrap();
        assert_eq!(result.model_used, "gemini");
    }

    #[tokio::test]
    async fn test_unsupported_model_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
            .expect(0)
            .mount(&server)
            .await;

        let err = service_for(&server)
            .call_external_model(Some("gpt-9"), "hello", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedModel(_)));
        assert!(err.to_string().contains("gpt-9"));
    }

    #[tokio::test]
    async fn test_missing_content_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let result = service_for(&server)
            .call_external_model(None, "hello", None)
            .await
            .unwrap();
        assert_eq!(result.text, NO_RESPONSE_TEXT);
        assert!(result.usage.is_none());
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": { "message": "Too many requests" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = service_for(&server)
            .call_external_model(None, "hello", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::RateLimited { .. }));
        assert!(err.to_string().contains("Rate limit"));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "message": "No auth credentials found" }
            })))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .call_external_model(None, "hello", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Authentication { status: 401, .. }));
        assert!(err.to_string().contains("No auth credentials found"));
    }

    #[tokio::test]
    async fn test_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .call_external_model(None, "hello", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::ServerError { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_generic_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "message": "context length exceeded" }
            })))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .call_external_model(None, "hello", None)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "API Error (status 400): context length exceeded"
        );
    }

    #[tokio::test]
    async fn test_non_json_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .call_external_model(None, "hello", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_network_failure_keeps_client_message() {
        // Reserve a free port, then release it so the connection is refused.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = format!("http://{}{}", addr, COMPLETIONS_PATH);
        let mut models = HashMap::new();
        models.insert(
            "offline".to_string(),
            BackendDescriptor {
                endpoint: endpoint.clone(),
                model_id: "openai/o3-mini".to_string(),
                token: "sk-offline".to_string(),
                metadata: None,
            },
        );
        let registry = BackendRegistry::new(
            models,
            RoutingPolicy {
                default_model: "offline".to_string(),
            },
        )
        .unwrap();
        let service = ModelService::new(Arc::new(registry)).unwrap();

        let err = service
            .call_external_model(None, "hello", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Transport(_)));
        assert_eq!(err.status(), None);

        let direct = Client::new().post(&endpoint).send().await.unwrap_err();
        assert_eq!(err.to_string(), direct.to_string());
    }

    #[test]
    fn test_normalize_without_usage() {
        let body = json!({ "choices": [{ "message": { "content": "hi" } }] });
        let result = ModelService::normalize(&body, "o3-mini", "openai/o3-mini");
        assert_eq!(result.text, "hi");
        assert!(result.usage.is_none());
    }

    #[test]
    fn test_normalize_drops_malformed_usage() {
        let body = json!({
            "choices": [{ "message": { "content": "hi" } }],
            "usage": { "prompt_tokens": "lots", "completion_tokens": 5 }
        });
        let result = ModelService::normalize(&body, "o3-mini", "openai/o3-mini");
        assert_eq!(result.text, "hi");
        assert!(result.usage.is_none());
    }
}
