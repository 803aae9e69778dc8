//! Data-store error types.

use thiserror::Error;

/// Result type for item store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while talking to the data store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not open or close a connection.
    #[error("Database connection failed: {0}")]
    Connection(String),

    /// A statement failed (constraint violation, missing table, ...).
    #[error("Database query failed: {0}")]
    Query(String),
}

impl StoreError {
    /// Create a new connection error.
    pub fn connection(err: impl ToString) -> Self {
        Self::Connection(err.to_string())
    }

    /// Create a new query error.
    pub fn query(err: impl ToString) -> Self {
        Self::Query(err.to_string())
    }
}
