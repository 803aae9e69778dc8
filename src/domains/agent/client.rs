//! Client side of the tool-serving boundary.
//!
//! The front door reaches tools only through [`ToolServerClient`]. The
//! production implementation speaks HTTP to the tool server; tests use
//! in-process fakes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, instrument};

use super::error::{AgentError, AgentResult};
use crate::core::config::AgentConfig;
use crate::domains::tools::{JsonObject, ToolCatalog, ToolDescriptor, ToolError};

/// Raw answer from a tool invocation: HTTP status and JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl UpstreamReply {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` field of the body, or the whole body as text.
    pub fn error_message(&self) -> String {
        self.body
            .get("error")
            .and_then(|v| v.as_str())
            .map(String::from)
            .unwrap_or_else(|| self.body.to_string())
    }
}

/// Access to the tool-serving process.
#[async_trait]
pub trait ToolServerClient: Send + Sync {
    /// Fetch the tool catalog.
    async fn list_tools(&self) -> AgentResult<Vec<ToolDescriptor>>;

    /// Invoke a tool. Non-2xx answers are returned, not raised.
    async fn invoke(
        &self,
        tool_name: &str,
        parameters: Option<&JsonObject>,
    ) -> AgentResult<UpstreamReply>;
}

/// HTTP client for the tool server's REST boundary.
///
/// Every request is bounded by the configured timeout. Nothing is retried.
pub struct HttpToolClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpToolClient {
    /// Create a client from front-door configuration.
    pub fn new(config: &AgentConfig) -> AgentResult<Self> {
        let base_url = Url::parse(&config.tool_server_url).map_err(AgentError::client_setup)?;
        if base_url.cannot_be_a_base() {
            return Err(AgentError::client_setup(format!(
                "'{}' cannot be used as a base URL",
                config.tool_server_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .map_err(AgentError::client_setup)?;

        Ok(Self { http, base_url })
    }

    /// Base URL extended by path segments. Each segment is percent-encoded
    /// as a whole, so `/`, `?` and `#` inside it cannot change the route.
    fn url(&self, segments: &[&str]) -> AgentResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AgentError::client_setup("base URL has no path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Names that are dropped or resolved when pushed as a path segment.
fn is_unroutable_name(name: &str) -> bool {
    matches!(name, "" | "." | "..")
}

/// Read a response into a reply. Non-JSON bodies become `{"error": text}`.
async fn read_reply(response: reqwest::Response) -> AgentResult<UpstreamReply> {
    let status = response.status().as_u16();
    let text = response.text().await.map_err(AgentError::unreachable)?;
    let body: serde_json::Value =
        serde_json::from_str(&text).unwrap_or_else(|_| serde_json::json!({ "error": text }));

    Ok(UpstreamReply { status, body })
}

#[async_trait]
impl ToolServerClient for HttpToolClient {
    #[instrument(skip(self))]
    async fn list_tools(&self) -> AgentResult<Vec<ToolDescriptor>> {
        let response = self
            .http
            .get(self.url(&["tools"])?)
            .send()
            .await
            .map_err(AgentError::unreachable)?;

        if !response.status().is_success() {
            let reply = read_reply(response).await?;
            return Err(AgentError::upstream(reply.status, reply.error_message()));
        }

        let catalog: ToolCatalog = response
            .json()
            .await
            .map_err(AgentError::invalid_response)?;
        debug!("Tool server lists {} tools", catalog.tools.len());
        Ok(catalog.tools)
    }

    #[instrument(skip(self, parameters))]
    async fn invoke(
        &self,
        tool_name: &str,
        parameters: Option<&JsonObject>,
    ) -> AgentResult<UpstreamReply> {
        if is_unroutable_name(tool_name) {
            return Ok(UpstreamReply {
                status: 404,
                body: serde_json::json!({ "error": ToolError::not_found(tool_name).to_string() }),
            });
        }

        let mut request = self.http.post(self.url(&["tools", tool_name])?);

        // Empty parameter objects are sent as no body at all.
        if let Some(parameters) = parameters.filter(|p| !p.is_empty()) {
            request = request.json(parameters);
        }

        let response = request.send().await.map_err(AgentError::unreachable)?;
        read_reply(response).await
    }
}
