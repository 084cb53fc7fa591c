#![allow(dead_code)]

use async_trait::async_trait;
use catalog_engine::{CatalogPipeline, EntityCache};
use catalog_source::{DetailResolver, ListFetcher, Page};
use catalog_types::{CatalogError, CatalogResult, EntityId, EntityRecord, EntityReference};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn reference(id: u64) -> EntityReference {
    EntityReference::new(EntityId::new(id), format!("mock://pokemon/{id}"))
}

pub fn record(id: u64, name: &str, categories: &[&str]) -> EntityRecord {
    EntityRecord::new(EntityId::new(id), name).with_categories(categories.iter().copied())
}

// ── Mock resolver ────────────────────────────────────────────────

#[derive(Default)]
pub struct MockResolver {
    failing: HashSet<EntityId>,
    delays: HashMap<EntityId, Duration>,
    calls: Mutex<HashMap<EntityId, usize>>,
    total: AtomicUsize,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, id: u64) -> Self {
        self.failing.insert(EntityId::new(id));
        self
    }

    pub fn delayed(mut self, id: u64, delay: Duration) -> Self {
        self.delays.insert(EntityId::new(id), delay);
        self
    }

    pub fn calls_for(&self, id: u64) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(&EntityId::new(id))
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DetailResolver for MockResolver {
    async fn resolve(&self, reference: &EntityReference) -> CatalogResult<EntityRecord> {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self.calls.lock().unwrap().entry(reference.id).or_default() += 1;

        if let Some(delay) = self.delays.get(&reference.id) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&reference.id) {
            return Err(CatalogError::detail(reference.id, "simulated failure"));
        }
        Ok(EntityRecord::new(reference.id, format!("entity-{}", reference.id)))
    }

    fn locator_for(&self, id: EntityId) -> String {
        format!("mock://pokemon/{id}")
    }
}

// ── Mock list fetcher ────────────────────────────────────────────

#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<Option<String>, Page>,
    delays: HashMap<Option<String>, Duration>,
    unavailable: bool,
    requested_sizes: Mutex<Vec<usize>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the page returned for `cursor`.
    pub fn page(mut self, cursor: Option<&str>, ids: &[u64], next: Option<&str>) -> Self {
        self.pages.insert(
            cursor.map(String::from),
            Page {
                references: ids.iter().map(|id| reference(*id)).collect(),
                next_cursor: next.map(String::from),
            },
        );
        self
    }

    pub fn delayed(mut self, cursor: Option<&str>, delay: Duration) -> Self {
        self.delays.insert(cursor.map(String::from), delay);
        self
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn requested_sizes(&self) -> Vec<usize> {
        self.requested_sizes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ListFetcher for MockFetcher {
    async fn fetch_page(&self, cursor: Option<&str>, page_size: usize) -> CatalogResult<Page> {
        self.requested_sizes.lock().unwrap().push(page_size);
        let key = cursor.map(String::from);
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        if self.unavailable {
            return Err(CatalogError::SourceUnavailable("mock source down".into()));
        }
        self.pages
            .get(&key)
            .cloned()
            .ok_or_else(|| CatalogError::SourceUnavailable(format!("no page for {key:?}")))
    }
}

pub fn pipeline(
    fetcher: MockFetcher,
    resolver: MockResolver,
) -> (CatalogPipeline, Arc<MockFetcher>, Arc<MockResolver>) {
    let fetcher = Arc::new(fetcher);
    let resolver = Arc::new(resolver);
    let cache = Arc::new(EntityCache::new(resolver.clone()));
    (
        CatalogPipeline::new(fetcher.clone(), cache),
        fetcher,
        resolver,
    )
}
