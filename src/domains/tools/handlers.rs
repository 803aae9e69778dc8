//! Tool invocation types and the handler trait.
//!
//! A tool is a [`ToolDescriptor`] plus a [`ToolHandler`] that performs one
//! logical data-store operation. Handlers are bound in the registry; the
//! dispatcher only ever sees them through this trait.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};

use super::error::ToolError;
use crate::domains::store::ItemStore;

/// JSON object holding tool parameters.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// Descriptors
// ============================================================================

/// Type and description of a single parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub description: String,
}

/// Parameter schema of a tool, serialized as a JSON Schema object.
///
/// Only the presence of `required` keys is enforced by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    #[serde(rename = "type", default = "object_type")]
    pub schema_type: String,

    #[serde(default)]
    pub properties: BTreeMap<String, PropertySchema>,

    #[serde(default)]
    pub required: Vec<String>,
}

fn object_type() -> String {
    "object".to_string()
}

impl ParameterSchema {
    /// A schema with no parameters.
    pub fn empty() -> Self {
        Self {
            schema_type: object_type(),
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    /// Add a string parameter.
    pub fn with_string(mut self, name: &str, description: &str, required: bool) -> Self {
        self.properties.insert(
            name.to_string(),
            PropertySchema {
                kind: "string".to_string(),
                description: description.to_string(),
            },
        );
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// The schema as a plain JSON object (for MCP tool metadata).
    pub fn to_json_object(&self) -> JsonObject {
        let properties = self
            .properties
            .iter()
            .map(|(name, prop)| {
                (
                    name.clone(),
                    serde_json::json!({
                        "type": prop.kind,
                        "description": prop.description,
                    }),
                )
            })
            .collect::<JsonObject>();

        let mut object = JsonObject::new();
        object.insert("type".into(), self.schema_type.clone().into());
        object.insert("properties".into(), properties.into());
        object.insert("required".into(), self.required.clone().into());
        object
    }
}

/// Name, description and parameter schema of a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub schema: ParameterSchema,
}

/// The discovery payload: `{"tools": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCatalog {
    pub tools: Vec<ToolDescriptor>,
}

// ============================================================================
// Invocation
// ============================================================================

/// A request to run one tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocationRequest {
    pub tool_name: String,

    #[serde(default)]
    pub parameters: Option<JsonObject>,
}

impl ToolInvocationRequest {
    /// A request without parameters.
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            parameters: None,
        }
    }

    /// Attach parameters to the request.
    pub fn with_parameters(mut self, parameters: JsonObject) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// Uniform outcome of a validated tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    Success { payload: serde_json::Value },
    Failure { error: String },
}

impl ToolResult {
    /// Whether the tool ran successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Wire form: the payload itself, or `{"error": ...}`.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            Self::Success { payload } => payload,
            Self::Failure { error } => serde_json::json!({ "error": error }),
        }
    }

    /// MCP form: the JSON text as content, flagged as an error on failure.
    pub fn into_call_tool_result(self) -> CallToolResult {
        match self {
            Self::Success { payload } => {
                CallToolResult::success(vec![Content::text(payload.to_string())])
            }
            Self::Failure { error } => CallToolResult::error(vec![Content::text(error)]),
        }
    }
}

// ============================================================================
// Handler trait
// ============================================================================

/// A tool implementation bound into the registry.
///
/// `execute` receives parameters whose required keys have already been
/// checked. Data-store failures should be returned as
/// [`ToolError::DataStore`]; the dispatcher turns them into
/// [`ToolResult::Failure`].
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Metadata published through discovery.
    fn descriptor(&self) -> ToolDescriptor;

    /// Execute the tool against the store.
    async fn execute(
        &self,
        store: &dyn ItemStore,
        parameters: &JsonObject,
    ) -> Result<serde_json::Value, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_wire_shape() {
        let schema = ParameterSchema::empty().with_string("name", "Item name", true);
        let value = serde_json::to_value(&schema).unwrap();

        assert_eq!(value["type"], "object");
        assert_eq!(value["properties"]["name"]["type"], "string");
        assert_eq!(value["required"], serde_json::json!(["name"]));
        assert_eq!(serde_json::Value::Object(schema.to_json_object()), value);
    }

    #[test]
    fn test_descriptor_parses_without_schema_type() {
        let descriptor: ToolDescriptor = serde_json::from_value(serde_json::json!({
            "name": "items_table",
            "description": "Read items",
            "schema": { "properties": {}, "required": [] }
        }))
        .unwrap();

        assert_eq!(descriptor.schema, ParameterSchema::empty());
    }

    #[test]
    fn test_failure_wire_form() {
        let result = ToolResult::Failure {
            error: "boom".to_string(),
        };
        assert!(!result.is_success());
        assert_eq!(result.into_json(), serde_json::json!({ "error": "boom" }));
    }

    #[test]
    fn test_failure_is_mcp_error() {
        let result = ToolResult::Failure {
            error: "boom".to_string(),
        }
        .into_call_tool_result();
        assert_eq!(result.is_error, Some(true));
    }
}
