//! Create item tool definition.
//!
//! Inserts a single row and returns it as stored.

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::domains::store::ItemStore;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{JsonObject, ParameterSchema, ToolDescriptor, ToolHandler};

/// Create item tool - inserts one item by name.
pub struct CreateItemTool;

impl CreateItemTool {
    /// Tool name as registered.
    pub const NAME: &'static str = "create_item";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Create a new item in the database";

    /// Name of the single required parameter.
    pub const PARAM_NAME: &'static str = "name";

    fn item_name(parameters: &JsonObject) -> Result<&str, ToolError> {
        match parameters.get(Self::PARAM_NAME) {
            Some(serde_json::Value::String(name)) if !name.is_empty() => Ok(name.as_str()),
            Some(serde_json::Value::String(_)) => Err(ToolError::invalid_arguments(
                "'name' must not be empty",
            )),
            Some(serde_json::Value::Null) | None => {
                Err(ToolError::missing_parameter(Self::PARAM_NAME))
            }
            Some(_) => Err(ToolError::invalid_arguments("'name' must be a string")),
        }
    }
}

#[async_trait]
impl ToolHandler for CreateItemTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME.to_string(),
            description: Self::DESCRIPTION.to_string(),
            schema: ParameterSchema::empty().with_string(
                Self::PARAM_NAME,
                "Name of the item to create",
                true,
            ),
        }
    }

    #[instrument(skip_all)]
    async fn execute(
        &self,
        store: &dyn ItemStore,
        parameters: &JsonObject,
    ) -> Result<serde_json::Value, ToolError> {
        let name = Self::item_name(parameters)?;
        let item = store.insert_item(name).await?;
        info!("Created item {} ({})", item.id, item.name);

        Ok(serde_json::json!({ "success": true, "item": item }))
    }
}
