//! Tool server entry point.
//!
//! Initializes logging, loads configuration, opens the item store and
//! serves the tool registry on the configured transport.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use items_mcp_server::core::{Config, McpServer, TransportService, init_logging};
use items_mcp_server::domains::store::open_store;
use items_mcp_server::domains::tools::{ToolDispatcher, ToolRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    let store = open_store(&config.database).await?;
    let registry = Arc::new(ToolRegistry::with_defaults());
    let dispatcher = ToolDispatcher::new(registry, store);

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config, dispatcher);

    info!("Server initialized");

    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}
