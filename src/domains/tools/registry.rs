//! Tool Registry - the static catalog of tools.
//!
//! Each entry binds a [`ToolDescriptor`] to its [`ToolHandler`]. The
//! registry is built once at startup and then only read, so it can be
//! shared behind an `Arc` without locking.
//!
//! Adding a tool means writing its definition and registering it in
//! [`ToolRegistry::with_defaults`]. The dispatcher and both transports
//! pick it up from here.

use std::sync::Arc;

use tracing::{info, warn};

use super::definitions::{CreateItemTool, ItemsTableTool};
use super::error::ToolError;
use super::handlers::{ToolDescriptor, ToolHandler};

/// A descriptor together with the handler that implements it.
#[derive(Clone)]
pub struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

impl RegisteredTool {
    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    pub fn handler(&self) -> &dyn ToolHandler {
        self.handler.as_ref()
    }
}

/// Ordered catalog of tools. Order is registration order.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with every built-in tool.
    pub fn with_defaults() -> Self {
        Self::new()
            .register(ItemsTableTool)
            .register(CreateItemTool)
    }

    /// Bind a handler. A handler with an already-registered name replaces
    /// the earlier binding in place.
    pub fn register<H>(mut self, handler: H) -> Self
    where
        H: ToolHandler + 'static,
    {
        let descriptor = handler.descriptor();
        let entry = RegisteredTool {
            descriptor,
            handler: Arc::new(handler),
        };

        match self
            .tools
            .iter_mut()
            .find(|t| t.descriptor.name == entry.descriptor.name)
        {
            Some(existing) => {
                warn!("Replacing tool registration: {}", entry.descriptor.name);
                *existing = entry;
            }
            None => {
                info!("Registering tool: {}", entry.descriptor.name);
                self.tools.push(entry);
            }
        }
        self
    }

    /// All descriptors in registration order.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor.clone()).collect()
    }

    /// Names of all tools in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.descriptor.name.as_str()).collect()
    }

    /// Look up a descriptor by exact, case-sensitive name.
    pub fn describe(&self, name: &str) -> Result<&ToolDescriptor, ToolError> {
        self.get(name)
            .map(RegisteredTool::descriptor)
            .ok_or_else(|| ToolError::not_found(name))
    }

    /// Look up a registered tool by exact name.
    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.iter().find(|t| t.descriptor.name == name)
    }
}
