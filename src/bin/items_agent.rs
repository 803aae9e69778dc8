//! Front-door entry point.
//!
//! Serves the `/agent/...` routes and forwards tool calls to the tool
//! server at `MCP_SERVER_URL`.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use items_mcp_server::core::{AgentHttpTransport, Config, init_logging};
use items_mcp_server::domains::agent::{AgentService, HttpToolClient};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    init_logging(&config.logging.level);

    info!("Starting front door for {}", config.agent.tool_server_url);

    let client = HttpToolClient::new(&config.agent)?;
    let service = AgentService::new(Arc::new(client));

    AgentHttpTransport::new(config.agent).run(service).await?;

    info!("Front door shutting down");

    Ok(())
}
