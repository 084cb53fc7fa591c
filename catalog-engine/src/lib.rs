//! List-resolution and filtering engine for the catalog browser.
//!
//! # Architecture
//!
//! - **Cache**: [`EntityCache`] holds resolved records and makes concurrent
//!   requests for the same id share a single in-flight fetch
//! - **Pipeline**: [`CatalogPipeline`] fetches a page of references, fans out
//!   one resolution per reference and joins them back in list order
//! - **Browser**: [`CatalogBrowser`] issues sequence-numbered page loads so a
//!   stale load never overwrites a newer one
//! - **Filter**: [`filter::apply`] narrows a resolved collection by name and
//!   category, purely and synchronously
//!
//! Partial success is the normal case: a failed item is reported as
//! [`ResolutionResult::Failed`](catalog_types::ResolutionResult) and never
//! aborts its siblings.

mod browser;
mod cache;
pub mod filter;
mod pipeline;

pub use browser::{CatalogBrowser, LoadOutcome};
pub use cache::EntityCache;
pub use filter::{CategoryFilter, CategoryVocabulary, FilterCriteria};
pub use pipeline::{CatalogPage, CatalogPipeline};
