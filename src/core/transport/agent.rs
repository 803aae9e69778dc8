//! Front-door HTTP transport.
//!
//! - `GET  /agent/tools` - proxied tool discovery
//! - `POST /agent/tools/execute` - proxied invocation (`{tool_name, parameters?}`)
//! - `POST /agent/query` - intent routing (`{query, context?}`)
//! - `GET  /agent/status` - tool server reachability, always 200
//! - `GET  /items` - all items via `items_table`
//!
//! An unreachable tool server is a 500 on the proxy routes; upstream
//! non-2xx answers are relayed with the same status.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult};
use crate::core::config::AgentConfig;
use crate::domains::agent::{AgentError, AgentQuery, AgentService};
use crate::domains::tools::{ToolCatalog, ToolInvocationRequest};

/// Front-door HTTP transport.
pub struct AgentHttpTransport {
    config: AgentConfig,
}

impl AgentHttpTransport {
    /// Create a new transport with the given config.
    pub fn new(config: AgentConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the front door until shut down.
    pub async fn run(self, service: AgentService) -> TransportResult<()> {
        let addr = self.address();
        let app = router(service, self.config.enable_cors);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - front door listening on {}", addr);
        info!("  → Query:  POST /agent/query");
        info!("  → Status: GET /agent/status");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the front-door router.
pub fn router(service: AgentService, enable_cors: bool) -> Router {
    let mut app = Router::new()
        .route("/agent/tools", get(list_tools))
        .route("/agent/tools/execute", post(execute_tool))
        .route("/agent/query", post(query))
        .route("/agent/status", get(status))
        .route("/items", get(list_items))
        .route("/health", get(health_check))
        .with_state(service);

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all)]
async fn list_tools(State(service): State<AgentService>) -> Response {
    match service.list_tools().await {
        Ok(tools) => Json(ToolCatalog { tools }).into_response(),
        Err(e) => agent_error_response(e, "Failed to fetch tools"),
    }
}

#[instrument(skip_all)]
async fn execute_tool(
    State(service): State<AgentService>,
    body: Result<Json<ToolInvocationRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return agent_error_response(
                AgentError::invalid_request_body(rejection.body_text()),
                "Rejected request",
            );
        }
    };

    info!("Executing tool {}", request.tool_name);
    match service.execute(request).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => agent_error_response(e, "Failed to execute tool"),
    }
}

#[instrument(skip_all)]
async fn query(
    State(service): State<AgentService>,
    body: Result<Json<AgentQuery>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(query)) => Json(service.query(query).await).into_response(),
        Err(rejection) => agent_error_response(
            AgentError::invalid_request_body(rejection.body_text()),
            "Rejected query",
        ),
    }
}

#[instrument(skip_all)]
async fn status(State(service): State<AgentService>) -> Response {
    Json(service.status().await).into_response()
}

#[instrument(skip_all)]
async fn list_items(State(service): State<AgentService>) -> Response {
    match service.list_items().await {
        Ok(items) => Json(items).into_response(),
        Err(e) => agent_error_response(e, "Failed to fetch items"),
    }
}

/// Map a front-door error to a status code and `{"error": ...}` body.
fn agent_error_response(err: AgentError, context: &str) -> Response {
    let (status, message) = match &err {
        AgentError::UpstreamUnreachable(_) | AgentError::ClientSetup(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{context}: {err}"))
        }
        AgentError::Upstream { status, message } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            message.clone(),
        ),
        AgentError::InvalidRequestBody(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        AgentError::InvalidResponse(_) => (StatusCode::BAD_GATEWAY, format!("{context}: {err}")),
    };

    warn!("{} ({})", message, status);
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
