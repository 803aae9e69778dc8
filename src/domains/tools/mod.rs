//! Tools domain module.
//!
//! Tools are named, schema-described database operations. The registry is
//! the catalog, the dispatcher validates and runs invocations, and the
//! router publishes the same catalog over MCP.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `handlers.rs` - Descriptor, request and result types, `ToolHandler` trait
//! - `registry.rs` - Static catalog binding descriptors to handlers
//! - `dispatcher.rs` - Validation and execution against the item store
//! - `router.rs` - rmcp ToolRouter built from the registry (STDIO transport)
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `ToolHandler`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `ToolRegistry::with_defaults()`
//!
//! The dispatcher, router and HTTP transport need no changes.

pub mod definitions;
mod dispatcher;
mod error;
mod handlers;
mod registry;
pub mod router;

pub use dispatcher::ToolDispatcher;
pub use error::ToolError;
pub use handlers::*;
pub use registry::{RegisteredTool, ToolRegistry};
pub use router::build_tool_router;
