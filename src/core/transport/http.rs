//! HTTP transport implementation.
//!
//! The REST tool boundary consumed by the front door:
//!
//! - `GET  {base}/tools` - `{"tools": [...]}` in registration order
//! - `POST {base}/tools/{name}` - optional JSON object body of parameters
//!
//! Status codes: 404 unknown tool, 400 missing/invalid parameters or body,
//! 500 data-store failure. Error bodies are always `{"error": "..."}`.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::domains::tools::{JsonObject, ToolCatalog, ToolError, ToolInvocationRequest, ToolResult};

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: McpServer,
    base_path: String,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = router(server, &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let base = normalized_base(&self.config.base_path);
        info!("Ready - listening on {}", addr);
        info!("  → Tools:  GET {}/tools", base);
        info!("  → Invoke: POST {}/tools/{{name}}", base);
        info!("  → Health: GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// `/mcp/v1/` -> `/mcp/v1`, `/` -> ``.
fn normalized_base(base_path: &str) -> String {
    let trimmed = base_path.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Build the tool server router.
pub fn router(server: McpServer, config: &HttpConfig) -> Router {
    let base_path = normalized_base(&config.base_path);

    let tools = Router::new()
        .route("/tools", get(list_tools))
        .route("/tools/{name}", post(invoke_tool));

    let app = if base_path.is_empty() {
        tools
    } else {
        Router::new().nest(&base_path, tools)
    };

    let mut app = app
        .route("/health", get(health_check))
        .route("/", get(root_handler))
        .with_state(AppState { server, base_path });

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "tools": format!("{}/tools", state.base_path),
            "invoke": format!("{}/tools/{{name}}", state.base_path),
            "health": "/health"
        }
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all)]
async fn list_tools(State(state): State<AppState>) -> Json<ToolCatalog> {
    info!("Listing tools");
    Json(ToolCatalog {
        tools: state.server.list_tools(),
    })
}

#[instrument(skip_all, fields(tool = %name))]
async fn invoke_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Response {
    let parameters = match parse_parameters(&body) {
        Ok(parameters) => parameters,
        Err(message) => {
            warn!("Rejected body for {}: {}", name, message);
            return error_response(StatusCode::BAD_REQUEST, message);
        }
    };

    let request = ToolInvocationRequest::new(name).with_parameters(parameters);
    match state.server.call_tool(request).await {
        Ok(ToolResult::Success { payload }) => (StatusCode::OK, Json(payload)).into_response(),
        Ok(ToolResult::Failure { error }) => error_response(StatusCode::INTERNAL_SERVER_ERROR, error),
        Err(e) => error_response(tool_error_status(&e), e.to_string()),
    }
}

/// Parse an optional JSON object body. Empty bodies and `null` mean no parameters.
fn parse_parameters(body: &[u8]) -> Result<JsonObject, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(JsonObject::new());
    }

    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(serde_json::Value::Null) => Ok(JsonObject::new()),
        Ok(_) => Err("Invalid request body: expected a JSON object".to_string()),
        Err(e) => Err(format!("Invalid request body: {e}")),
    }
}

fn tool_error_status(err: &ToolError) -> StatusCode {
    match err {
        ToolError::NotFound(_) => StatusCode::NOT_FOUND,
        ToolError::MissingParameter(_) | ToolError::InvalidArguments(_) => StatusCode::BAD_REQUEST,
        ToolError::DataStore(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::core::transport::test_support::send;
    use crate::domains::store::{Item, ItemStore, MemoryItemStore, StoreError, StoreResult};
    use crate::domains::tools::{ToolDispatcher, ToolRegistry};
    use async_trait::async_trait;
    use axum::http::Method;
    use std::sync::Arc;

    struct DownStore;

    #[async_trait]
    impl ItemStore for DownStore {
        async fn list_items(&self) -> StoreResult<Vec<Item>> {
            Err(StoreError::connection("could not connect to server"))
        }

        async fn insert_item(&self, _name: &str) -> StoreResult<Item> {
            Err(StoreError::connection("could not connect to server"))
        }
    }

    fn app_with(store: Arc<dyn ItemStore>, config: &HttpConfig) -> Router {
        let dispatcher = ToolDispatcher::new(Arc::new(ToolRegistry::with_defaults()), store);
        router(McpServer::new(Config::default(), dispatcher), config)
    }

    fn app() -> Router {
        app_with(Arc::new(MemoryItemStore::new()), &HttpConfig::default())
    }

    #[tokio::test]
    async fn test_list_tools_in_registration_order() {
        let (status, body) = send(app(), Method::GET, "/mcp/v1/tools", None).await;
        assert_eq!(status, StatusCode::OK);

        let tools = body["tools"].as_array().unwrap();
        assert_eq!(tools[0]["name"], "items_table");
        assert_eq!(tools[1]["name"], "create_item");
        assert_eq!(tools[1]["schema"]["required"], serde_json::json!(["name"]));
        assert_eq!(tools[1]["schema"]["properties"]["name"]["type"], "string");
    }

    #[tokio::test]
    async fn test_items_table_without_body_on_empty_store() {
        let (status, body) = send(app(), Method::POST, "/mcp/v1/tools/items_table", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "rows": [] }));
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let app = app();

        let (status, body) = send(
            app.clone(),
            Method::POST,
            "/mcp/v1/tools/create_item",
            Some(r#"{"name": "Desk"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({ "success": true, "item": { "id": 1, "name": "Desk" } })
        );

        let (_, body) = send(app, Method::POST, "/mcp/v1/tools/items_table", None).await;
        assert_eq!(body["rows"][0]["name"], "Desk");
    }

    #[tokio::test]
    async fn test_create_without_name_is_bad_request() {
        let (status, body) =
            send(app(), Method::POST, "/mcp/v1/tools/create_item", Some("{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required parameter: name");

        let (status, _) = send(app(), Method::POST, "/mcp/v1/tools/create_item", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_not_found() {
        let (status, body) = send(
            app(),
            Method::POST,
            "/mcp/v1/tools/nope",
            Some(r#"{"name": "x"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Tool 'nope' not found");
    }

    #[tokio::test]
    async fn test_invalid_bodies_are_bad_request() {
        for body in ["[1, 2]", "not json", "\"name\""] {
            let (status, value) =
                send(app(), Method::POST, "/mcp/v1/tools/create_item", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(value["error"].as_str().unwrap().starts_with("Invalid request body"));
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_server_error_with_message() {
        let app = app_with(Arc::new(DownStore), &HttpConfig::default());
        let (status, body) = send(app, Method::POST, "/mcp/v1/tools/items_table", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("could not connect"));
    }

    #[tokio::test]
    async fn test_root_base_path() {
        let config = HttpConfig {
            base_path: "/".to_string(),
            ..HttpConfig::default()
        };
        let app = app_with(Arc::new(MemoryItemStore::new()), &config);
        let (status, body) = send(app, Method::GET, "/tools", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tools"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[test]
    fn test_normalized_base() {
        assert_eq!(normalized_base("/mcp/v1/"), "/mcp/v1");
        assert_eq!(normalized_base("mcp"), "/mcp");
        assert_eq!(normalized_base("/"), "");
    }
}
