//! Agent service - the intent router in front of the tool server.
//!
//! A free-text query is classified, turned into at most one tool
//! invocation, and answered with the raw tool result plus a one-line
//! interpretation. The service keeps no state between calls.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::client::ToolServerClient;
use super::error::{AgentError, AgentResult};
use super::intent::{Intent, IntentClassifier, extract_item_name};
use crate::domains::tools::definitions::{CreateItemTool, ItemsTableTool};
use crate::domains::tools::{JsonObject, ToolDescriptor, ToolInvocationRequest};

/// Example queries returned with every query response.
pub const USAGE_EXAMPLES: &[&str] = &[
    "list all items",
    "show me the items",
    "create a new item called 'My New Item'",
    "add an item named 'Test Item'",
];

/// Capabilities reported by the status check.
pub const CAPABILITIES: &[&str] = &[
    "Natural language query processing",
    "MCP tool discovery and execution",
    "Database operations via MCP protocol",
];

/// Hint returned when a query matches no intent.
pub const CAPABILITIES_HINT: &str = "I can help you list items or create new ones. \
     Try asking 'list items' or 'create a new item called X'";

// ============================================================================
// Request / response types
// ============================================================================

/// A free-text query from a client.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentQuery {
    pub query: String,

    #[serde(default)]
    pub context: Option<String>,
}

/// What the router did for a query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub action: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_used: Option<String>,

    pub result: serde_json::Value,

    pub interpretation: String,
}

/// Full answer to a query.
#[derive(Debug, Clone, Serialize)]
pub struct AgentResponse {
    pub query: String,
    pub context: Option<String>,
    pub available_tools: Vec<String>,
    pub results: Vec<QueryResult>,
    pub usage_examples: Vec<String>,

    /// Set when tool discovery failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reachability of the tool server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Connected,
    Disconnected,
}

/// Answer to the status check.
#[derive(Debug, Clone, Serialize)]
pub struct AgentStatus {
    pub ai_agent: &'static str,
    pub mcp_server: ServerStatus,
    pub capabilities: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Service
// ============================================================================

/// Front-door service: tool proxy, intent router and status check.
#[derive(Clone)]
pub struct AgentService {
    client: Arc<dyn ToolServerClient>,
    classifier: IntentClassifier,
}

impl AgentService {
    /// Create a service using the default classification rules.
    pub fn new(client: Arc<dyn ToolServerClient>) -> Self {
        Self {
            client,
            classifier: IntentClassifier::default(),
        }
    }

    /// Replace the classifier.
    pub fn with_classifier(mut self, classifier: IntentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Proxy tool discovery.
    pub async fn list_tools(&self) -> AgentResult<Vec<ToolDescriptor>> {
        self.client.list_tools().await
    }

    /// Proxy one invocation. Non-2xx answers become [`AgentError::Upstream`].
    #[instrument(skip_all, fields(tool = %request.tool_name))]
    pub async fn execute(&self, request: ToolInvocationRequest) -> AgentResult<serde_json::Value> {
        let reply = self
            .client
            .invoke(&request.tool_name, request.parameters.as_ref())
            .await?;

        if reply.is_success() {
            Ok(reply.body)
        } else {
            warn!("Tool {} returned {}", request.tool_name, reply.status);
            Err(AgentError::upstream(reply.status, reply.error_message()))
        }
    }

    /// All items as `{"items": [...]}`, read through `items_table`.
    pub async fn list_items(&self) -> AgentResult<serde_json::Value> {
        let data = self
            .execute(ToolInvocationRequest::new(ItemsTableTool::NAME))
            .await?;
        let rows = data
            .get("rows")
            .cloned()
            .unwrap_or_else(|| serde_json::json!([]));

        Ok(serde_json::json!({ "items": rows }))
    }

    /// Classify a query, run the matching tool and interpret the result.
    ///
    /// Never fails: discovery and tool failures are reported inside the
    /// response.
    #[instrument(skip_all)]
    pub async fn query(&self, query: AgentQuery) -> AgentResponse {
        let (tools, error) = match self.client.list_tools().await {
            Ok(tools) => (tools, None),
            Err(e) => {
                warn!("Tool discovery failed: {}", e);
                (Vec::new(), Some(e.to_string()))
            }
        };
        let tool_names: Vec<String> = tools.iter().map(|t| t.name.clone()).collect();

        let intent = self.classifier.classify(&query.query);
        info!(?intent, "Classified query");

        let result = match intent {
            Intent::ListItems => self.run_list().await,
            Intent::CreateItem => self.run_create(&query.query).await,
            Intent::Unknown => QueryResult {
                action: intent.action(),
                tool_used: None,
                result: serde_json::json!({ "available_tools": tool_names }),
                interpretation: CAPABILITIES_HINT.to_string(),
            },
        };

        AgentResponse {
            query: query.query,
            context: query.context,
            available_tools: tool_names,
            results: vec![result],
            usage_examples: USAGE_EXAMPLES.iter().map(|s| s.to_string()).collect(),
            error,
        }
    }

    /// Check whether the tool server answers. Unreachability is reported, not raised.
    pub async fn status(&self) -> AgentStatus {
        let (mcp_server, error) = match self.client.list_tools().await {
            Ok(_) => (ServerStatus::Connected, None),
            Err(e) => {
                warn!("Tool server status check failed: {}", e);
                (ServerStatus::Disconnected, Some(e.to_string()))
            }
        };

        AgentStatus {
            ai_agent: "ready",
            mcp_server,
            capabilities: CAPABILITIES.iter().map(|s| s.to_string()).collect(),
            error,
        }
    }

    async fn run_list(&self) -> QueryResult {
        let request = ToolInvocationRequest::new(ItemsTableTool::NAME);
        match self.execute(request).await {
            Ok(data) => {
                let count = data
                    .get("rows")
                    .and_then(|rows| rows.as_array())
                    .map_or(0, Vec::len);
                QueryResult {
                    action: Intent::ListItems.action(),
                    tool_used: Some(ItemsTableTool::NAME.to_string()),
                    result: data,
                    interpretation: format!("Retrieved {count} items from the database"),
                }
            }
            Err(e) => failed_result(Intent::ListItems, ItemsTableTool::NAME, &e),
        }
    }

    async fn run_create(&self, query: &str) -> QueryResult {
        let name = extract_item_name(query);

        let mut parameters = JsonObject::new();
        parameters.insert(CreateItemTool::PARAM_NAME.into(), name.clone().into());
        let request = ToolInvocationRequest::new(CreateItemTool::NAME).with_parameters(parameters);

        match self.execute(request).await {
            Ok(data) => QueryResult {
                action: Intent::CreateItem.action(),
                tool_used: Some(CreateItemTool::NAME.to_string()),
                result: data,
                interpretation: format!("Created new item: '{name}'"),
            },
            Err(e) => failed_result(Intent::CreateItem, CreateItemTool::NAME, &e),
        }
    }
}

fn failed_result(intent: Intent, tool: &str, err: &AgentError) -> QueryResult {
    QueryResult {
        action: intent.action(),
        tool_used: Some(tool.to_string()),
        result: serde_json::json!({ "error": err.to_string() }),
        interpretation: format!("Tool '{tool}' failed: {err}"),
    }
}
