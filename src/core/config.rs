//! Configuration management for the MCP server.
//!
//! Server-level settings come from environment variables (optionally seeded
//! from a `.env` file). The backend registry itself lives in a separate JSON
//! file whose location is configured here; see
//! [`BackendRegistry::load`](crate::domains::models::BackendRegistry::load).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Default location of the models configuration file.
pub const DEFAULT_MODELS_CONFIG_PATH: &str = "config/models-config.json";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Models domain configuration.
    pub models: ModelsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients during initialization.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for the models domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Path to the JSON file describing the backend registry.
    pub config_path: PathBuf,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_MODELS_CONFIG_PATH),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "coding-conversations-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            models: ModelsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Recognised variables: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL` and
    /// `MCP_MODELS_CONFIG`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(path) = std::env::var("MCP_MODELS_CONFIG") {
            info!("Models configuration path set from environment: {}", path);
            config.models.config_path = PathBuf::from(path);
        }

        config
    }
}
