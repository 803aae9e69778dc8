//! Agent domain module.
//!
//! The front door: it proxies tool discovery and invocation to the
//! tool-serving process and routes free-text queries to tools through a
//! keyword heuristic.
//!
//! - `intent.rs` - Intent classification rules and item-name extraction
//! - `client.rs` - `ToolServerClient` trait and its HTTP implementation
//! - `service.rs` - `AgentService`: proxy, query routing, status check
//! - `error.rs` - Agent-specific error types

mod client;
mod error;
pub mod intent;
mod service;

pub use client::{HttpToolClient, ToolServerClient, UpstreamReply};
pub use error::{AgentError, AgentResult};
pub use intent::{Intent, IntentClassifier, IntentRule, extract_item_name};
pub use service::{
    AgentQuery, AgentResponse, AgentService, AgentStatus, CAPABILITIES, CAPABILITIES_HINT,
    QueryResult, ServerStatus, USAGE_EXAMPLES,
};

#[cfg(test)]
pub(crate) use service::tests::FakeToolServer;
