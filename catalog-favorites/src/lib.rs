//! Persisted favorites for the catalog browser.
//!
//! Favorites are best-effort state. [`FavoritesStore`] keeps the selection in
//! memory and writes it through an injected [`KeyValueStore`]; if storage
//! cannot be read or written, the store keeps working for the session
//! without persisting rather than failing the application.

mod error;
mod favorites;
mod kv;

pub use error::{StorageError, StorageResult};
pub use favorites::{FAVORITES_KEY, FavoritesStore};
pub use kv::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
