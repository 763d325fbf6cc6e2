//! # Store Errors
//!
//! Error types for datastore access.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Datastore errors
///
/// Messages never carry connection credentials.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Connection could not be established (unreachable, auth, timeout)
    #[error("Failed to connect to datastore: {0}")]
    Connect(String),

    /// Statement execution failed
    #[error("Query failed: {0}")]
    Query(String),

    /// A returned row did not match the expected column types
    #[error("Cannot map column '{column}': {reason}")]
    Mapping { column: &'static str, reason: String },
}

impl StoreError {
    /// Short error category for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Connect(_) => "connect",
            StoreError::Query(_) => "query",
            StoreError::Mapping { .. } => "mapping",
        }
    }
}
