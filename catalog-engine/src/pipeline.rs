//! Page loading: list fetch, fan-out resolution, ordered join.

use crate::cache::EntityCache;
use catalog_source::{DEFAULT_PAGE_SIZE, ListFetcher};
use catalog_types::{CatalogError, CatalogResult, EntityId, EntityRecord, ResolutionResult};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info};

/// One loaded page: per-item outcomes in API list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogPage {
    pub results: Vec<ResolutionResult>,
    pub next_cursor: Option<String>,
}

impl CatalogPage {
    /// Resolved records, in list order.
    pub fn records(&self) -> Vec<Arc<EntityRecord>> {
        self.results
            .iter()
            .filter_map(|r| r.record().cloned())
            .collect()
    }

    /// Failed items with their reasons, in list order.
    pub fn failures(&self) -> Vec<(EntityId, &CatalogError)> {
        self.results
            .iter()
            .filter_map(|r| match r {
                ResolutionResult::Failed { id, reason } => Some((*id, reason)),
                ResolutionResult::Resolved(_) => None,
            })
            .collect()
    }

    pub fn resolved_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_resolved()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Orchestrates list fetch, per-item resolution and cache population.
pub struct CatalogPipeline {
    fetcher: Arc<dyn ListFetcher>,
    cache: Arc<EntityCache>,
    page_size: usize,
}

impl CatalogPipeline {
    /// Creates a pipeline using [`DEFAULT_PAGE_SIZE`].
    pub fn new(fetcher: Arc<dyn ListFetcher>, cache: Arc<EntityCache>) -> Self {
        Self::with_page_size(fetcher, cache, DEFAULT_PAGE_SIZE)
    }

    /// Creates a pipeline with an explicit page size.
    pub fn with_page_size(
        fetcher: Arc<dyn ListFetcher>,
        cache: Arc<EntityCache>,
        page_size: usize,
    ) -> Self {
        Self {
            fetcher,
            cache,
            page_size,
        }
    }

    pub fn cache(&self) -> &Arc<EntityCache> {
        &self.cache
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Loads one page and resolves every reference on it.
    ///
    /// Only a list failure fails the load. Item failures come back as
    /// [`ResolutionResult::Failed`] in their list position.
    pub async fn load_page(&self, cursor: Option<&str>) -> CatalogResult<CatalogPage> {
        let page = self.fetcher.fetch_page(cursor, self.page_size).await?;

        let results = join_all(page.references.iter().map(|reference| async move {
            match self.cache.get_or_resolve(reference).await {
                Ok(record) => ResolutionResult::Resolved(record),
                Err(reason) => ResolutionResult::Failed {
                    id: reference.id,
                    reason,
                },
            }
        }))
        .await;

        let loaded = CatalogPage {
            results,
            next_cursor: page.next_cursor,
        };

        let failed = loaded.results.len() - loaded.resolved_count();
        if failed > 0 {
            info!(
                resolved = loaded.resolved_count(),
                failed, "Loaded catalog page with partial failures"
            );
        } else {
            debug!(resolved = loaded.resolved_count(), "Loaded catalog page");
        }

        Ok(loaded)
    }

    /// Resolves a single entity addressed by the string form of its id.
    ///
    /// The id is validated before any request is issued.
    pub async fn resolve_id(&self, raw_id: &str) -> CatalogResult<Arc<EntityRecord>> {
        let id = EntityId::parse(raw_id)?;
        if let Some(record) = self.cache.get(id) {
            return Ok(record);
        }
        let reference = self.cache.resolver().reference_for(id);
        self.cache.get_or_resolve(&reference).await
    }
}
