//! Error types for the favorites storage layer.

use catalog_types::CatalogError;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store is unusable for some other reason.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<StorageError> for CatalogError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Unavailable(cause) => CatalogError::StorageUnavailable(cause),
            other => CatalogError::StorageUnavailable(other.to_string()),
        }
    }
}
