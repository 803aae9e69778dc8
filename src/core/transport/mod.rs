//! Transport layer.
//!
//! Tool server transports:
//! - **STDIO**: MCP over standard input/output (default)
//! - **HTTP**: REST tool boundary (`GET {base}/tools`, `POST {base}/tools/{name}`)
//!
//! Front door:
//! - **Agent HTTP**: `/agent/...` routes backed by `AgentService`
//!
//! Domain errors are mapped to HTTP status codes only here.

mod config;
mod error;
mod service;

pub mod agent;
pub mod http;
pub mod stdio;

#[cfg(test)]
mod test_support;

pub use agent::AgentHttpTransport;
pub use config::{HttpConfig, TransportConfig};
pub use error::{TransportError, TransportResult};
pub use service::TransportService;
