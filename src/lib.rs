//! Item tools over MCP/HTTP, with an intent-routing front door.
//!
//! Two small database operations are published as named, schema-described
//! tools. A second entry point takes free-text queries, classifies them
//! with a keyword heuristic and forwards them to the matching tool.
//!
//! # Architecture
//!
//! - **core**: configuration, logging, the MCP server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: registry, dispatcher and tool definitions
//!   - **store**: the item store contract and its backends
//!   - **agent**: intent router, tool-server client and front-door service
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use items_mcp_server::core::{Config, McpServer};
//! use items_mcp_server::domains::store::open_store;
//! use items_mcp_server::domains::tools::{ToolDispatcher, ToolRegistry};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let store = open_store(&config.database).await?;
//!     let dispatcher = ToolDispatcher::new(Arc::new(ToolRegistry::with_defaults()), store);
//!     let server = McpServer::new(config, dispatcher);
//!     // Start a transport...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, McpServer};
