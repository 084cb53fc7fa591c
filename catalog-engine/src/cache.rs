//! In-memory entity cache with per-id in-flight deduplication.

use catalog_source::DetailResolver;
use catalog_types::{CatalogResult, EntityId, EntityRecord, EntityReference};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

type PendingResolution = Shared<BoxFuture<'static, CatalogResult<Arc<EntityRecord>>>>;

enum Slot {
    Ready(Arc<EntityRecord>),
    Pending(PendingResolution),
}

/// Maps entity ids to resolved records.
///
/// At most one resolution runs per id at a time: callers that arrive while a
/// fetch is in flight await the same shared handle and observe the same
/// outcome. The map lock is only held to look up or swap a slot, never
/// across an await, so unrelated ids never serialize on each other.
pub struct EntityCache {
    resolver: Arc<dyn DetailResolver>,
    slots: Mutex<HashMap<EntityId, Slot>>,
}

impl EntityCache {
    /// Creates an empty cache that resolves misses through `resolver`.
    pub fn new(resolver: Arc<dyn DetailResolver>) -> Self {
        Self {
            resolver,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the resolver misses are sent to.
    pub fn resolver(&self) -> &Arc<dyn DetailResolver> {
        &self.resolver
    }

    /// Returns the cached record, resolving it first if needed.
    ///
    /// Failures are handed to every waiter but are not stored, so a later
    /// call retries the fetch.
    pub async fn get_or_resolve(
        &self,
        reference: &EntityReference,
    ) -> CatalogResult<Arc<EntityRecord>> {
        let id = reference.id;
        let pending = {
            let mut slots = self.lock();
            match slots.get(&id) {
                Some(Slot::Ready(record)) => {
                    debug!(%id, "Entity cache hit");
                    return Ok(Arc::clone(record));
                }
                Some(Slot::Pending(pending)) => {
                    debug!(%id, "Joining in-flight resolution");
                    pending.clone()
                }
                None => {
                    let pending = self.start_resolution(reference);
                    slots.insert(id, Slot::Pending(pending.clone()));
                    pending
                }
            }
        };

        let outcome = pending.clone().await;
        self.settle(id, &pending, &outcome);
        outcome
    }

    /// Non-blocking lookup. Pending or failed ids return `None`.
    pub fn get(&self, id: EntityId) -> Option<Arc<EntityRecord>> {
        match self.lock().get(&id) {
            Some(Slot::Ready(record)) => Some(Arc::clone(record)),
            _ => None,
        }
    }

    /// Drops the entry for `id`. Returns true if anything was removed.
    ///
    /// A resolution already in flight still completes for its waiters but
    /// its result is not stored.
    pub fn invalidate(&self, id: EntityId) -> bool {
        let removed = self.lock().remove(&id).is_some();
        if removed {
            debug!(%id, "Invalidated cached entity");
        }
        removed
    }

    /// Number of resolved records held.
    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of all resolved records, sorted.
    pub fn ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .lock()
            .iter()
            .filter_map(|(id, slot)| matches!(slot, Slot::Ready(_)).then_some(*id))
            .collect();
        ids.sort();
        ids
    }

    fn start_resolution(&self, reference: &EntityReference) -> PendingResolution {
        let resolver = Arc::clone(&self.resolver);
        let reference = reference.clone();
        async move { resolver.resolve(&reference).await.map(Arc::new) }
            .boxed()
            .shared()
    }

    /// Replaces the pending slot with its outcome, unless the slot was
    /// invalidated or replaced in the meantime.
    fn settle(
        &self,
        id: EntityId,
        pending: &PendingResolution,
        outcome: &CatalogResult<Arc<EntityRecord>>,
    ) {
        let mut slots = self.lock();
        let still_ours = matches!(
            slots.get(&id),
            Some(Slot::Pending(current)) if current.ptr_eq(pending)
        );
        if !still_ours {
            return;
        }
        match outcome {
            Ok(record) => {
                slots.insert(id, Slot::Ready(Arc::clone(record)));
            }
            Err(e) => {
                warn!(%id, error = %e, "Entity resolution failed");
                slots.remove(&id);
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<EntityId, Slot>> {
        // Slots are swapped atomically under the lock, so a poisoned map is
        // still consistent.
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
