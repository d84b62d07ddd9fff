//! Storage error types

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Record with this key already exists (witness data is append-only)
    #[error("record already exists: {0}")]
    AlreadyExists(String),

    /// Record not found
    #[error("record not found: {0}")]
    NotFound(String),

    /// Storage backend error (database, filesystem, etc.); the underlying
    /// message is preserved verbatim
    #[error("{0}")]
    Backend(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;
