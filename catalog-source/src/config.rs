//! Source configuration.

use serde::{Deserialize, Serialize};

/// Number of references requested per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Configuration for the remote catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the API (e.g. `https://pokeapi.co/api/v2`).
    pub api_base_url: String,
    /// Path of the list endpoint, relative to the base URL.
    pub list_path: String,
    /// Path prefix of detail documents addressed by id.
    pub detail_path: String,
    /// References requested per page.
    pub page_size: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://pokeapi.co/api/v2".to_string(),
            list_path: "pokemon".to_string(),
            detail_path: "pokemon".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: 30,
        }
    }
}

impl SourceConfig {
    /// Creates a config pointing at a different base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Full URL of the list endpoint.
    pub fn list_url(&self) -> String {
        join_url(&self.api_base_url, &self.list_path)
    }

    /// Full URL of a detail document.
    pub fn detail_url(&self, id: impl std::fmt::Display) -> String {
        format!("{}/{id}", join_url(&self.api_base_url, &self.detail_path))
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_matches('/')
    )
}
