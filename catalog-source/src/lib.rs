//! Remote catalog source.
//!
//! The remote API is two-tiered: a paginated list endpoint hands out
//! lightweight references, and each reference points at a detail document
//! holding the full record. This crate abstracts both tiers behind the
//! [`ListFetcher`] and [`DetailResolver`] traits and provides an HTTP
//! implementation, [`HttpCatalogSource`].
//!
//! Neither tier retries internally; retry policy belongs to the caller.

mod config;
mod http;
mod source;
mod wire;

pub use config::{DEFAULT_PAGE_SIZE, SourceConfig};
pub use http::HttpCatalogSource;
pub use source::{DetailResolver, ListFetcher, Page};
