//! Backend registry - the immutable map of model names to upstream backends.
//!
//! The registry is read once from a JSON file at start-up, validated, and then
//! shared read-only (behind an `Arc`) for the lifetime of the process.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use super::error::ModelError;
use crate::core::{Error, Result};

/// Connection details for one upstream model.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendDescriptor {
    /// Completions endpoint URL.
    pub endpoint: String,

    /// Model identifier understood by the upstream (e.g. `openai/o3-mini`).
    pub model_id: String,

    /// Bearer token forwarded in the `Authorization` header.
    pub token: String,

    /// Descriptive information; never sent upstream.
    #[serde(default)]
    pub metadata: Option<BackendMetadata>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for BackendDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendDescriptor")
            .field("endpoint", &self.endpoint)
            .field("model_id", &self.model_id)
            .field("token", &"[REDACTED]")
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Optional descriptive metadata attached to a backend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendMetadata {
    pub description: Option<String>,
    pub use_case: Option<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    pub cost_tier: Option<CostTier>,
}

/// Coarse price bracket of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostTier {
    Low,
    Medium,
    High,
}

/// Rule selecting a backend when the caller omits one.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingPolicy {
    pub default_model: String,
}

/// Registry of all configured backends, keyed by caller-facing model name.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendRegistry {
    models: HashMap<String, BackendDescriptor>,
    routing: RoutingPolicy,
}

impl BackendRegistry {
    /// Build a registry from parts, checking its invariants.
    pub fn new(models: HashMap<String, BackendDescriptor>, routing: RoutingPolicy) -> Result<Self> {
        let registry = Self { models, routing };
        registry.validate()?;
        Ok(registry)
    }

    /// Read and validate a registry from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading models configuration from {}", path.display());

        let data = std::fs::read_to_string(path).map_err(|e| Error::config_file(path, e))?;
        let registry = Self::from_json(&data)?;

        info!(
            "Loaded {} model(s), default model: {}",
            registry.models.len(),
            registry.routing.default_model
        );
        for (name, backend) in &registry.models {
            debug!(
                model = %name,
                upstream = %backend.model_id,
                cost_tier = ?backend.metadata.as_ref().and_then(|m| m.cost_tier),
                "Registered backend"
            );
        }

        Ok(registry)
    }

    /// Parse and validate a registry from a JSON document.
    pub fn from_json(data: &str) -> Result<Self> {
        let registry: Self = serde_json::from_str(data)?;
        registry.validate()?;
        Ok(registry)
    }

    /// Resolve a caller-facing model name to its backend.
    ///
    /// `None` selects the routing default. Returns the resolved name along
    /// with the descriptor.
    pub fn resolve<'a>(
        &'a self,
        model: Option<&'a str>,
    ) -> std::result::Result<(&'a str, &'a BackendDescriptor), ModelError> {
        let name = model.unwrap_or(self.routing.default_model.as_str());
        self.models
            .get(name)
            .map(|backend| (name, backend))
            .ok_or_else(|| ModelError::unsupported_model(name))
    }

    /// The routing default model name.
    pub fn default_model(&self) -> &str {
        &self.routing.default_model
    }

    /// All configured model names, sorted.
    pub fn model_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn validate(&self) -> Result<()> {
        if self.models.is_empty() {
            return Err(Error::config("no models configured"));
        }

        for (name, backend) in &self.models {
            let missing = [
                ("endpoint", &backend.endpoint),
                ("modelId", &backend.model_id),
                ("token", &backend.token),
            ]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty());

            if let Some((field, _)) = missing {
                return Err(Error::config(format!(
                    "model \"{}\" has an empty {}",
                    name, field
                )));
            }
        }

        if !self.models.contains_key(&self.routing.default_model) {
            return Err(Error::config(format!(
                "default model \"{}\" is not defined in models",
                self.routing.default_model
            )));
        }

        Ok(())
    }
}
