//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration and the models registry, and
//! serves MCP over stdio until the client disconnects or the process is
//! interrupted.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use coding_conversations_mcp::core::{Config, McpServer, ShutdownReason, StdioTransport};
use coding_conversations_mcp::domains::models::{BackendRegistry, ModelService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // A missing or invalid models file is fatal
    let registry = BackendRegistry::load(&config.models.config_path)
        .inspect_err(|e| error!("Error loading models configuration: {}", e))
        .context("Failed to load models configuration")?;

    let service = ModelService::new(Arc::new(registry))?;
    let server = McpServer::new(config, Arc::new(service));

    info!("Server initialized");

    let reason = StdioTransport::run(server).await?;

    info!("Server shutting down");

    // The stdin reader thread outlives an interrupted session; exit instead
    // of waiting on it during runtime teardown.
    if reason == ShutdownReason::Interrupted {
        std::process::exit(0);
    }

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the MCP protocol.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
