//! Configuration file handling.

use anyhow::{Context, Result};
use catalog_engine::CategoryVocabulary;
use catalog_source::SourceConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "catalog";

/// Top-level configuration, loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Remote API settings.
    pub source: SourceConfig,
    /// Where favorites are stored. Defaults to the user data directory.
    pub favorites_path: Option<PathBuf>,
    /// Canonical category names accepted by the category filter.
    pub categories: CategoryVocabulary,
}

impl CatalogConfig {
    /// Loads configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path),
                None => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Resolved favorites database path.
    pub fn favorites_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.favorites_path {
            return Ok(path.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR).join("favorites.db"))
            .context("No data directory available; set favorites_path in the config file")
    }
}

/// `<config dir>/catalog/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}
