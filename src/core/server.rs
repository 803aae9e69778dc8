//! MCP Server implementation.
//!
//! [`McpServer`] owns the tool dispatcher and implements the rmcp
//! `ServerHandler` trait for the STDIO transport. The HTTP transport uses
//! the plain methods ([`McpServer::list_tools`], [`McpServer::call_tool`]),
//! so both transports share one dispatcher.
//!
//! The rmcp ToolRouter is built from the registry in
//! `domains/tools/router.rs`. **Adding a new tool does NOT require
//! modifying this file!**

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;

use super::config::Config;
use crate::domains::tools::{
    ToolDescriptor, ToolDispatcher, ToolError, ToolInvocationRequest, ToolResult,
    build_tool_router,
};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Validates and executes tool calls.
    dispatcher: Arc<ToolDispatcher>,

    /// Tool router for handling MCP tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server around a dispatcher.
    pub fn new(config: Config, dispatcher: ToolDispatcher) -> Self {
        let dispatcher = Arc::new(dispatcher);

        Self {
            tool_router: build_tool_router::<Self>(dispatcher.clone()),
            config: Arc::new(config),
            dispatcher,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// All tool descriptors in registration order.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.dispatcher.registry().list_tools()
    }

    /// Call a tool through the dispatcher.
    pub async fn call_tool(&self, request: ToolInvocationRequest) -> Result<ToolResult, ToolError> {
        self.dispatcher.dispatch(request).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Item database tools: 'items_table' lists all items, \
                 'create_item' inserts one item by name."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
