//! HTTP implementation of the catalog source.

use crate::config::SourceConfig;
use crate::source::{DetailResolver, ListFetcher, Page};
use crate::wire::{DetailPayload, ListPayload};
use async_trait::async_trait;
use catalog_types::{CatalogError, CatalogResult, EntityId, EntityRecord, EntityReference};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Catalog source backed by a JSON HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    config: SourceConfig,
    client: Client,
}

impl HttpCatalogSource {
    /// Creates a new source with its own HTTP client.
    pub fn new(config: SourceConfig) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                CatalogError::SourceUnavailable(format!("failed to create HTTP client: {e}"))
            })?;
        Ok(Self::with_client(config, client))
    }

    /// Creates a new source sharing an existing HTTP client.
    pub fn with_client(config: SourceConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    fn list_request(&self, cursor: Option<&str>, page_size: usize) -> reqwest::RequestBuilder {
        let limit = page_size.to_string();
        match cursor {
            Some(c) if c.starts_with("http://") || c.starts_with("https://") => self.client.get(c),
            Some(c) => self
                .client
                .get(self.config.list_url())
                .query(&[("cursor", c), ("limit", limit.as_str())]),
            None => self
                .client
                .get(self.config.list_url())
                .query(&[("limit", limit.as_str())]),
        }
    }
}

#[async_trait]
impl ListFetcher for HttpCatalogSource {
    async fn fetch_page(&self, cursor: Option<&str>, page_size: usize) -> CatalogResult<Page> {
        if page_size == 0 {
            return Err(CatalogError::SourceUnavailable(
                "page size must be positive".to_string(),
            ));
        }

        debug!(cursor = cursor.unwrap_or("<start>"), page_size, "Fetching catalog page");

        let response = self
            .list_request(cursor, page_size)
            .send()
            .await
            .map_err(|e| CatalogError::SourceUnavailable(format!("list request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(CatalogError::SourceUnavailable(format!(
                "list request returned HTTP {}",
                response.status()
            )));
        }

        let payload: ListPayload = response.json().await.map_err(|e| {
            CatalogError::SourceUnavailable(format!("failed to parse list response: {e}"))
        })?;

        let items = payload.results.ok_or_else(|| {
            CatalogError::SourceUnavailable("list response has no results".to_string())
        })?;

        let references = items
            .into_iter()
            .map(|item| item.into_reference(|id| self.config.detail_url(id)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CatalogError::SourceUnavailable(format!("malformed list page: {e}")))?;

        debug!(
            count = references.len(),
            has_next = payload.next.is_some(),
            "Fetched catalog page"
        );

        Ok(Page {
            references,
            next_cursor: payload.next,
        })
    }
}

#[async_trait]
impl DetailResolver for HttpCatalogSource {
    async fn resolve(&self, reference: &EntityReference) -> CatalogResult<EntityRecord> {
        let id = reference.id;
        debug!(%id, locator = %reference.locator, "Fetching entity detail");

        let response = self
            .client
            .get(&reference.locator)
            .send()
            .await
            .map_err(|e| CatalogError::detail(id, format!("detail request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(CatalogError::detail(
                id,
                format!("detail request returned HTTP {}", response.status()),
            ));
        }

        let payload: DetailPayload = response
            .json()
            .await
            .map_err(|e| CatalogError::detail(id, format!("failed to parse detail: {e}")))?;

        payload.into_record(id)
    }

    fn locator_for(&self, id: EntityId) -> String {
        self.config.detail_url(id)
    }
}
