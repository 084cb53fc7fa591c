//! The favorites selection.

use crate::error::StorageResult;
use crate::kv::KeyValueStore;
use catalog_types::{CatalogError, EntityId};
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key holding the serialized favorites list.
pub const FAVORITES_KEY: &str = "favorites";

/// Set of favorite entity ids, kept in insertion order.
///
/// When storage fails the store switches to degraded mode: changes are
/// still tracked in memory for the session but nothing is written, so an
/// unreadable stored value is never clobbered. The failure that caused it
/// is kept as [`CatalogError::StorageUnavailable`].
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
    ids: Vec<EntityId>,
    last_error: Option<CatalogError>,
}

impl FavoritesStore {
    /// Loads favorites from `storage`.
    ///
    /// Never fails: a missing key yields an empty set, and an unreadable or
    /// corrupt value yields an empty set in degraded mode.
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        let (ids, last_error) = match load(storage.as_ref()) {
            Ok(ids) => {
                debug!(count = ids.len(), "Loaded favorites");
                (ids, None)
            }
            Err(e) => {
                warn!(error = %e, "Favorites unreadable, continuing without persistence");
                (Vec::new(), Some(e.into()))
            }
        };
        Self {
            storage,
            ids,
            last_error,
        }
    }

    /// Adds `id`. Returns false if it was already a favorite.
    pub fn add(&mut self, id: EntityId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        self.persist();
        true
    }

    /// Removes `id`. Returns false if it was not a favorite.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id);
        if self.ids.len() == before {
            return false;
        }
        self.persist();
        true
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.contains(&id)
    }

    /// Favorites in insertion order.
    pub fn list(&self) -> Vec<EntityId> {
        self.ids.clone()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True once storage has failed; changes are then kept in memory only.
    pub fn is_degraded(&self) -> bool {
        self.last_error.is_some()
    }

    /// The storage failure that switched the store to degraded mode.
    pub fn last_error(&self) -> Option<&CatalogError> {
        self.last_error.as_ref()
    }

    fn persist(&mut self) {
        if self.is_degraded() {
            return;
        }
        if let Err(e) = save(self.storage.as_ref(), &self.ids) {
            warn!(error = %e, "Failed to persist favorites, continuing without persistence");
            self.last_error = Some(e.into());
        }
    }
}

fn load(storage: &dyn KeyValueStore) -> StorageResult<Vec<EntityId>> {
    let Some(raw) = storage.get(FAVORITES_KEY)? else {
        return Ok(Vec::new());
    };
    let stored: Vec<EntityId> = serde_json::from_str(&raw)?;

    let mut ids = Vec::with_capacity(stored.len());
    for id in stored {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

fn save(storage: &dyn KeyValueStore, ids: &[EntityId]) -> StorageResult<()> {
    let raw = serde_json::to_string(ids)?;
    storage.set(FAVORITES_KEY, &raw)
}
