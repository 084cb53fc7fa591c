//! Sequence-guarded page loading for a live view.
//!
//! Every load takes a ticket from a monotonic counter. Results are applied
//! only if their ticket is still the newest one issued, so a slow, stale
//! load can never overwrite a newer one.

use crate::pipeline::{CatalogPage, CatalogPipeline};
use catalog_types::CatalogResult;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

/// What happened to a finished load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page is now the current view.
    Applied(Arc<CatalogPage>),
    /// A newer load was issued while this one ran; its results were dropped.
    Superseded { ticket: u64, latest: u64 },
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied(_))
    }

    pub fn page(&self) -> Option<&Arc<CatalogPage>> {
        match self {
            LoadOutcome::Applied(page) => Some(page),
            LoadOutcome::Superseded { .. } => None,
        }
    }
}

/// Holds the currently displayed page and guards it against stale loads.
pub struct CatalogBrowser {
    pipeline: Arc<CatalogPipeline>,
    sequence: AtomicU64,
    current: RwLock<Option<Arc<CatalogPage>>>,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl CatalogBrowser {
    pub fn new(pipeline: Arc<CatalogPipeline>) -> Self {
        Self {
            pipeline,
            sequence: AtomicU64::new(0),
            current: RwLock::new(None),
            in_flight: Mutex::new(None),
        }
    }

    pub fn pipeline(&self) -> &Arc<CatalogPipeline> {
        &self.pipeline
    }

    /// Newest ticket issued so far (0 before the first load).
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// The page currently applied to the view.
    pub fn current(&self) -> Option<Arc<CatalogPage>> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Loads a page and applies it if no newer load was issued meanwhile.
    pub async fn load(&self, cursor: Option<&str>) -> CatalogResult<LoadOutcome> {
        let ticket = self.next_ticket();
        self.load_with_ticket(ticket, cursor).await
    }

    /// Runs a load on a background task, aborting the previous spawned load.
    ///
    /// The ticket is taken before spawning so loads are ordered by call
    /// order, not by when their tasks first run. Ticket issue and handle
    /// swap happen under one lock, so the task left in flight is always the
    /// one holding the newest ticket.
    pub fn spawn_load(
        self: &Arc<Self>,
        cursor: Option<String>,
    ) -> JoinHandle<CatalogResult<LoadOutcome>> {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let ticket = self.next_ticket();
        let browser = Arc::clone(self);
        let handle =
            tokio::spawn(async move { browser.load_with_ticket(ticket, cursor.as_deref()).await });

        let previous = in_flight.replace(handle.abort_handle());
        drop(in_flight);
        if let Some(previous) = previous {
            debug!(ticket, "Cancelling superseded page load");
            previous.abort();
        }
        handle
    }

    fn next_ticket(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn load_with_ticket(
        &self,
        ticket: u64,
        cursor: Option<&str>,
    ) -> CatalogResult<LoadOutcome> {
        let page = self.pipeline.load_page(cursor).await?;
        Ok(self.apply(ticket, page))
    }

    fn apply(&self, ticket: u64, page: CatalogPage) -> LoadOutcome {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Checked under the write lock so two finishing loads cannot both
        // pass the check and then race on the store.
        let latest = self.sequence();
        if ticket != latest {
            debug!(ticket, latest, "Discarding superseded page load");
            return LoadOutcome::Superseded { ticket, latest };
        }
        let page = Arc::new(page);
        *current = Some(Arc::clone(&page));
        LoadOutcome::Applied(page)
    }
}
