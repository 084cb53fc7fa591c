//! Core type definitions for the catalog browser.
//!
//! This crate defines the fundamental types shared by every other crate:
//! - Entity identifiers, validated before they reach the network
//! - References (list-endpoint pointers) and fully resolved records
//! - Per-item resolution outcomes
//! - The error taxonomy for the whole pipeline
//!
//! Nothing here performs I/O.

mod error;
mod ids;
mod record;

pub use error::{CatalogError, CatalogResult};
pub use ids::EntityId;
pub use record::{EntityRecord, EntityReference, ResolutionResult, Stat};
