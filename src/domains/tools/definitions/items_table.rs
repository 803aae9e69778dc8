//! Items table tool definition.
//!
//! Reads every row of the `items` table.

use async_trait::async_trait;
use tracing::info;

use crate::domains::store::ItemStore;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{JsonObject, ParameterSchema, ToolDescriptor, ToolHandler};

/// Items table tool - returns id and name for all items.
pub struct ItemsTableTool;

impl ItemsTableTool {
    /// Tool name as registered.
    pub const NAME: &'static str = "items_table";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Return id and name for all items from the database";
}

#[async_trait]
impl ToolHandler for ItemsTableTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME.to_string(),
            description: Self::DESCRIPTION.to_string(),
            schema: ParameterSchema::empty(),
        }
    }

    async fn execute(
        &self,
        store: &dyn ItemStore,
        _parameters: &JsonObject,
    ) -> Result<serde_json::Value, ToolError> {
        let rows = store.list_items().await?;
        info!("Read {} items", rows.len());
        Ok(serde_json::json!({ "rows": rows }))
    }
}
