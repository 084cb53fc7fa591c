//! Source abstraction traits.

use async_trait::async_trait;
use catalog_types::{CatalogResult, EntityId, EntityRecord, EntityReference};

/// One page of references from the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// References in API list order.
    pub references: Vec<EntityReference>,
    /// Cursor for the following page, if the source has one.
    pub next_cursor: Option<String>,
}

/// Fetches pages of entity references.
#[async_trait]
pub trait ListFetcher: Send + Sync {
    /// Fetches one page.
    ///
    /// `cursor` is `None` for the first page, otherwise a value previously
    /// returned as [`Page::next_cursor`]. Fails with `SourceUnavailable`.
    async fn fetch_page(&self, cursor: Option<&str>, page_size: usize) -> CatalogResult<Page>;
}

/// Resolves a reference into a full record.
#[async_trait]
pub trait DetailResolver: Send + Sync {
    /// Fetches and parses the record behind `reference`.
    ///
    /// Fails with `DetailUnavailable` on transport or parse failure, when the
    /// name is missing, or when the payload id does not match `reference.id`.
    async fn resolve(&self, reference: &EntityReference) -> CatalogResult<EntityRecord>;

    /// Detail address of an entity known only by id.
    fn locator_for(&self, id: EntityId) -> String;

    /// Reference for an entity known only by id.
    fn reference_for(&self, id: EntityId) -> EntityReference {
        EntityReference::new(id, self.locator_for(id))
    }
}
