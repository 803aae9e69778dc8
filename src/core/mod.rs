//! Core module containing shared infrastructure components.
//!
//! Configuration, logging, the MCP server handler and the transports that
//! expose it.

pub mod config;
pub mod logging;
pub mod server;
pub mod transport;

pub use config::Config;
pub use logging::init_logging;
pub use server::McpServer;
pub use transport::{AgentHttpTransport, TransportConfig, TransportService};
