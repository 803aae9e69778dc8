//! Agent-specific error types.

use thiserror::Error;

/// Result type for front-door operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Errors raised by the front door while talking to the tool server.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The tool-serving process could not be reached (refused, timed out).
    #[error("Tool server unreachable: {0}")]
    UpstreamUnreachable(String),

    /// The tool server answered with a non-success status.
    #[error("Tool server returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The client sent a body that could not be parsed.
    #[error("Invalid request body: {0}")]
    InvalidRequestBody(String),

    /// The tool server answered with something that is not the expected JSON.
    #[error("Invalid response from tool server: {0}")]
    InvalidResponse(String),

    /// The HTTP client could not be set up (bad base URL, TLS backend).
    #[error("Tool client setup failed: {0}")]
    ClientSetup(String),
}

impl AgentError {
    /// Create a new "unreachable" error.
    pub fn unreachable(err: impl ToString) -> Self {
        Self::UpstreamUnreachable(err.to_string())
    }

    /// Create a new upstream status error.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Create a new "invalid request body" error.
    pub fn invalid_request_body(msg: impl Into<String>) -> Self {
        Self::InvalidRequestBody(msg.into())
    }

    /// Create a new "client setup" error.
    pub fn client_setup(err: impl ToString) -> Self {
        Self::ClientSetup(err.to_string())
    }

    /// Create a new "invalid response" error.
    pub fn invalid_response(err: impl ToString) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}
