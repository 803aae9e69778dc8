//! Tool Dispatcher - validates and executes tool invocations.
//!
//! For any request naming a registered tool with its required parameters
//! present, [`ToolDispatcher::dispatch`] returns a [`ToolResult`]. Data-store
//! failures become [`ToolResult::Failure`] and are never retried, since
//! repeating a write is not idempotent.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::error::ToolError;
use super::handlers::{JsonObject, ToolInvocationRequest, ToolResult};
use super::registry::ToolRegistry;
use crate::domains::store::ItemStore;

/// Executes tool invocations against the item store.
///
/// Holds no per-call state; clones share the registry and store.
#[derive(Clone)]
pub struct ToolDispatcher {
    registry: Arc<ToolRegistry>,
    store: Arc<dyn ItemStore>,
}

impl ToolDispatcher {
    /// Create a dispatcher over a registry and a store.
    pub fn new(registry: Arc<ToolRegistry>, store: Arc<dyn ItemStore>) -> Self {
        Self { registry, store }
    }

    /// The registry this dispatcher validates against.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Validate and run one invocation.
    ///
    /// Fails with [`ToolError::NotFound`] for unknown tools and
    /// [`ToolError::MissingParameter`] when a required key is absent or
    /// `null`. Handler-level argument errors pass through unchanged.
    #[instrument(skip_all, fields(tool = %request.tool_name))]
    pub async fn dispatch(&self, request: ToolInvocationRequest) -> Result<ToolResult, ToolError> {
        let tool = self.registry.get(&request.tool_name).ok_or_else(|| {
            warn!("Unknown tool requested: {}", request.tool_name);
            ToolError::not_found(&request.tool_name)
        })?;

        let parameters = request.parameters.unwrap_or_default();
        check_required(&tool.descriptor().schema.required, &parameters)?;

        match tool.handler().execute(self.store.as_ref(), &parameters).await {
            Ok(payload) => {
                info!("Tool {} succeeded", request.tool_name);
                Ok(ToolResult::Success { payload })
            }
            Err(ToolError::DataStore(e)) => {
                warn!("Tool {} failed: {}", request.tool_name, e);
                Ok(ToolResult::Failure {
                    error: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }
}

fn check_required(required: &[String], parameters: &JsonObject) -> Result<(), ToolError> {
    for key in required {
        if matches!(parameters.get(key), None | Some(serde_json::Value::Null)) {
            return Err(ToolError::missing_parameter(key));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::store::{Item, MemoryItemStore, StoreError, StoreResult};
    use async_trait::async_trait;
    use std::collections::HashSet;

    struct BrokenStore;

    #[async_trait]
    impl ItemStore for BrokenStore {
        async fn list_items(&self) -> StoreResult<Vec<Item>> {
            Err(StoreError::connection("connection refused"))
        }

        async fn insert_item(&self, _name: &str) -> StoreResult<Item> {
            Err(StoreError::query("duplicate key value"))
        }
    }

    fn dispatcher(store: Arc<dyn ItemStore>) -> ToolDispatcher {
        ToolDispatcher::new(Arc::new(ToolRegistry::with_defaults()), store)
    }

    fn create(name: &str) -> ToolInvocationRequest {
        let mut params = JsonObject::new();
        params.insert("name".into(), name.into());
        ToolInvocationRequest::new("create_item").with_parameters(params)
    }

    #[tokio::test]
    async fn test_unknown_tool_ignores_parameters() {
        let dispatcher = dispatcher(Arc::new(MemoryItemStore::new()));

        let mut with_params = create("x");
        with_params.tool_name = "drop_table".to_string();

        for request in [ToolInvocationRequest::new("drop_table"), with_params] {
            let result = dispatcher.dispatch(request).await;
            assert!(matches!(result, Err(ToolError::NotFound(name)) if name == "drop_table"));
        }
    }

    #[tokio::test]
    async fn test_create_with_empty_parameters_is_missing_name() {
        let dispatcher = dispatcher(Arc::new(MemoryItemStore::new()));

        let request = ToolInvocationRequest::new("create_item").with_parameters(JsonObject::new());
        let result = dispatcher.dispatch(request).await;
        assert!(matches!(result, Err(ToolError::MissingParameter(name)) if name == "name"));

        let result = dispatcher.dispatch(ToolInvocationRequest::new("create_item")).await;
        assert!(matches!(result, Err(ToolError::MissingParameter(_))));
    }

    #[tokio::test]
    async fn test_null_required_parameter_is_missing() {
        let dispatcher = dispatcher(Arc::new(MemoryItemStore::new()));

        let mut params = JsonObject::new();
        params.insert("name".into(), serde_json::Value::Null);
        let request = ToolInvocationRequest::new("create_item").with_parameters(params);
        let result = dispatcher.dispatch(request).await;
        assert!(matches!(result, Err(ToolError::MissingParameter(_))));
    }

    #[tokio::test]
    async fn test_distinct_creates_get_distinct_ids() {
        let dispatcher = dispatcher(Arc::new(MemoryItemStore::new()));
        let names = ["first", "second item", "'quoted'"];

        let mut ids = HashSet::new();
        for name in names {
            let result = dispatcher.dispatch(create(name)).await.unwrap();
            let ToolResult::Success { payload } = result else {
                panic!("expected success");
            };
            assert_eq!(payload["item"]["name"], name);
            ids.insert(payload["item"]["id"].as_i64().unwrap());
        }
        assert_eq!(ids.len(), names.len());
    }

    #[tokio::test]
    async fn test_empty_table_is_success() {
        let dispatcher = dispatcher(Arc::new(MemoryItemStore::new()));
        let result = dispatcher
            .dispatch(ToolInvocationRequest::new("items_table"))
            .await
            .unwrap();
        assert_eq!(
            result,
            ToolResult::Success {
                payload: serde_json::json!({ "rows": [] })
            }
        );
    }

    #[tokio::test]
    async fn test_store_failure_becomes_failure_envelope() {
        let dispatcher = dispatcher(Arc::new(BrokenStore));

        let read = dispatcher
            .dispatch(ToolInvocationRequest::new("items_table"))
            .await
            .unwrap();
        assert!(matches!(read, ToolResult::Failure { error } if error.contains("connection refused")));

        let write = dispatcher.dispatch(create("x")).await.unwrap();
        assert!(matches!(write, ToolResult::Failure { error } if error.contains("duplicate key")));
    }
}
