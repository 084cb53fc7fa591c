//! References, resolved records and per-item resolution outcomes.

use crate::error::CatalogError;
use crate::ids::EntityId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Minimal pointer returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityReference {
    /// Stable, globally unique id.
    pub id: EntityId,
    /// Opaque address of the full record.
    pub locator: String,
}

impl EntityReference {
    /// Creates a new reference.
    pub fn new(id: EntityId, locator: impl Into<String>) -> Self {
        Self {
            id,
            locator: locator.into(),
        }
    }
}

/// A single named stat value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub name: String,
    pub value: i64,
}

/// A fully resolved catalog entity.
///
/// Categories keep source order with duplicates removed. Stats behave as a
/// map keyed by name that iterates in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRecord {
    id: EntityId,
    name: String,
    image_url: String,
    categories: Vec<String>,
    stats: Vec<Stat>,
    abilities: Vec<String>,
}

impl EntityRecord {
    /// Creates a record with only the required fields set.
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image_url: String::new(),
            categories: Vec::new(),
            stats: Vec::new(),
            abilities: Vec::new(),
        }
    }

    /// Sets the image URL.
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// Appends categories, skipping any already present.
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for category in categories {
            let category = category.into();
            if !self.categories.contains(&category) {
                self.categories.push(category);
            }
        }
        self
    }

    /// Sets a stat. An existing stat of the same name is overwritten in place.
    #[must_use]
    pub fn with_stat(mut self, name: impl Into<String>, value: i64) -> Self {
        let name = name.into();
        match self.stats.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.value = value,
            None => self.stats.push(Stat { name, value }),
        }
        self
    }

    /// Appends abilities in order.
    #[must_use]
    pub fn with_abilities<I, S>(mut self, abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abilities.extend(abilities.into_iter().map(Into::into));
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Image URL, empty when the source had none.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Returns true if the record carries the given category (exact match).
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Stats in source order.
    pub fn stats(&self) -> &[Stat] {
        &self.stats
    }

    /// Looks up a stat by name.
    pub fn stat(&self, name: &str) -> Option<i64> {
        self.stats.iter().find(|s| s.name == name).map(|s| s.value)
    }

    pub fn abilities(&self) -> &[String] {
        &self.abilities
    }
}

/// Outcome of resolving one reference during a page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult {
    /// The record was resolved (possibly from cache).
    Resolved(Arc<EntityRecord>),
    /// The record could not be resolved; siblings are unaffected.
    Failed { id: EntityId, reason: CatalogError },
}

impl ResolutionResult {
    /// The id this outcome is about, resolved or not.
    pub fn id(&self) -> EntityId {
        match self {
            ResolutionResult::Resolved(record) => record.id(),
            ResolutionResult::Failed { id, .. } => *id,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionResult::Resolved(_))
    }

    /// Returns the record if resolved.
    pub fn record(&self) -> Option<&Arc<EntityRecord>> {
        match self {
            ResolutionResult::Resolved(record) => Some(record),
            ResolutionResult::Failed { .. } => None,
        }
    }

    /// Returns the failure reason if not resolved.
    pub fn reason(&self) -> Option<&CatalogError> {
        match self {
            ResolutionResult::Resolved(_) => None,
            ResolutionResult::Failed { reason, .. } => Some(reason),
        }
    }
}
