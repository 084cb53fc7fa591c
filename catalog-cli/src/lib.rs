//! Shared pieces of the `catalog` binary: configuration and rendering.

pub mod config;
pub mod render;

pub use config::CatalogConfig;
