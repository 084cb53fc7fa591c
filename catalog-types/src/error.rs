//! Error taxonomy for the catalog pipeline.

use crate::ids::EntityId;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur anywhere in the catalog pipeline.
///
/// Causes are carried as strings so a single failure can be cloned out to
/// every caller waiting on the same in-flight resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The list endpoint was unreachable or returned a malformed page.
    #[error("catalog source unavailable: {0}")]
    SourceUnavailable(String),

    /// A single item's detail fetch or parse failed.
    #[error("detail unavailable for #{id}: {cause}")]
    DetailUnavailable { id: EntityId, cause: String },

    /// Favorites persistence could not be read or written.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A malformed identifier was used for lookup or routing.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

impl CatalogError {
    /// Builds a `DetailUnavailable` for the given id.
    pub fn detail(id: EntityId, cause: impl Into<String>) -> Self {
        CatalogError::DetailUnavailable {
            id,
            cause: cause.into(),
        }
    }

    /// Returns true if the caller may retry the failed operation.
    ///
    /// Only source and per-item detail failures are transient; a bad
    /// identifier stays bad and storage failures are absorbed by favorites.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CatalogError::SourceUnavailable(_) | CatalogError::DetailUnavailable { .. }
        )
    }

    /// Returns the entity this error is about, if any.
    pub fn entity_id(&self) -> Option<EntityId> {
        match self {
            CatalogError::DetailUnavailable { id, .. } => Some(*id),
            _ => None,
        }
    }
}
