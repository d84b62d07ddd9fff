//! Error types for the SQLite storage backend

use pagechain_core::StoreError;
use thiserror::Error;

/// Result type for SQLite storage operations
pub type Result<T> = std::result::Result<T, SqliteError>;

/// Errors that can occur during SQLite storage operations
#[derive(Debug, Error)]
pub enum SqliteError {
    /// Database connection or query error
    #[error("SQLite error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Record already exists (witness data is append-only)
    #[error("record already exists: {0}")]
    AlreadyExists(String),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(String),

    /// Value cannot be represented in its column encoding
    #[error("encoding error: {0}")]
    Encoding(String),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convert SqliteError to StoreError for the storage traits
impl From<SqliteError> for StoreError {
    fn from(err: SqliteError) -> Self {
        match err {
            SqliteError::AlreadyExists(id) => StoreError::AlreadyExists(id),
            SqliteError::Json(e) => StoreError::Serialization(e.to_string()),
            SqliteError::Database(e) => StoreError::Backend(format!("SQLite: {}", e)),
            SqliteError::Migration(msg) => StoreError::Backend(format!("migration: {}", msg)),
            SqliteError::Encoding(msg) => StoreError::Serialization(msg),
            SqliteError::Io(e) => StoreError::Backend(format!("IO: {}", e)),
        }
    }
}
