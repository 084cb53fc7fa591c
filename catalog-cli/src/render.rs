//! Plain-text rendering of pipeline results.
//!
//! Functions here only format; they never fetch or mutate.

use catalog_engine::{CatalogPage, FilterCriteria, filter};
use catalog_favorites::FavoritesStore;
use catalog_types::{EntityId, EntityRecord};
use std::fmt::Write;

const FAVORITE_MARK: &str = " ★";

/// One listing line for a resolved record.
pub fn record_line(record: &EntityRecord, favorite: bool) -> String {
    let categories = if record.categories().is_empty() {
        String::new()
    } else {
        format!(" [{}]", record.categories().join(", "))
    };
    format!(
        "{} {}{}{}",
        record.id().padded(),
        record.name(),
        categories,
        if favorite { FAVORITE_MARK } else { "" }
    )
}

/// Renders a loaded page.
///
/// Resolved records are narrowed by `criteria` and listed in page order.
/// Failed items follow on their own lines and are never filtered, so "didn't
/// load" is never mistaken for "no match".
pub fn page(page: &CatalogPage, criteria: &FilterCriteria, favorites: &FavoritesStore) -> String {
    let mut out = String::new();

    let matched = filter::apply(&page.records(), criteria);
    for record in &matched {
        let _ = writeln!(out, "{}", record_line(record, favorites.contains(record.id())));
    }

    let failures = page.failures();
    for (id, reason) in &failures {
        let _ = writeln!(out, "! {} failed to load: {reason}", id.padded());
    }

    if matched.is_empty() && page.resolved_count() > 0 {
        let _ = writeln!(out, "No entries match the current filter.");
    } else if page.is_empty() {
        let _ = writeln!(out, "No entries on this page.");
    }

    if !failures.is_empty() {
        let _ = writeln!(
            out,
            "{} of {} entries failed to load.",
            failures.len(),
            page.results.len()
        );
    }
    if let Some(next) = &page.next_cursor {
        let _ = writeln!(out, "Next page: {next}");
    }
    out
}

/// Renders the detail view of a single record.
pub fn detail(record: &EntityRecord, favorite: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}{}",
        record.id().padded(),
        record.name(),
        if favorite { FAVORITE_MARK } else { "" }
    );
    if !record.image_url().is_empty() {
        let _ = writeln!(out, "Image: {}", record.image_url());
    }
    if !record.categories().is_empty() {
        let _ = writeln!(out, "Types: {}", record.categories().join(", "));
    }

    let _ = writeln!(out, "\nStats");
    if record.stats().is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    let width = record.stats().iter().map(|s| s.name.len()).max().unwrap_or(0);
    for stat in record.stats() {
        let _ = writeln!(out, "  {:<width$}  {}", stat.name, stat.value);
    }

    let _ = writeln!(out, "\nAbilities");
    if record.abilities().is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for ability in record.abilities() {
        let _ = writeln!(out, "  - {ability}");
    }
    out
}

/// Renders the favorites list.
pub fn favorites(ids: &[EntityId]) -> String {
    if ids.is_empty() {
        return "You haven't added any favorites yet.\n".to_string();
    }
    let mut out = String::new();
    for id in ids {
        let _ = writeln!(out, "{}  (catalog show {id})", id.padded());
    }
    out
}

/// Renders the category vocabulary.
pub fn categories(names: &[String]) -> String {
    let mut out = String::from("all\n");
    for name in names {
        let _ = writeln!(out, "{name}");
    }
    out
}
