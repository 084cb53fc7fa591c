//! Client-side search and category filtering.
//!
//! Everything here is pure: no I/O, inputs are never mutated and the output
//! is always an order-preserving subsequence of the input.

use catalog_types::EntityRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Keyword that selects every category.
pub const ALL_CATEGORIES: &str = "all";

/// Category half of the filter predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive category name.
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, record: &EntityRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => record.has_category(category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s.to_string())
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

/// Search query plus category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the name. Empty matches everything.
    pub query: String,
    pub category: CategoryFilter,
}

impl FilterCriteria {
    pub fn new(query: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            query: query.into(),
            category,
        }
    }

    /// Criteria that match every record.
    pub fn any() -> Self {
        Self::default()
    }

    /// Returns true if both the name and category predicates hold.
    pub fn matches(&self, record: &EntityRecord) -> bool {
        self.matches_name(record) && self.category.matches(record)
    }

    fn matches_name(&self, record: &EntityRecord) -> bool {
        self.query.is_empty() || record.name().to_lowercase().contains(&self.query.to_lowercase())
    }
}

/// Returns the records matching `criteria`, in their original order.
pub fn apply(records: &[Arc<EntityRecord>], criteria: &FilterCriteria) -> Vec<Arc<EntityRecord>> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

/// Canonical category names, supplied by configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryVocabulary(Vec<String>);

impl CategoryVocabulary {
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for category in categories {
            let category = category.into();
            if !names.contains(&category) {
                names.push(category);
            }
        }
        Self(names)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.iter().any(|c| c == category)
    }

    pub fn categories(&self) -> &[String] {
        &self.0
    }

    /// Parses a user-supplied category selection against the vocabulary.
    ///
    /// `"all"` always parses; anything else must be a known category.
    pub fn parse_filter(&self, raw: &str) -> Option<CategoryFilter> {
        match raw.parse::<CategoryFilter>() {
            Ok(CategoryFilter::All) => Some(CategoryFilter::All),
            Ok(CategoryFilter::Only(category)) if self.contains(&category) => {
                Some(CategoryFilter::Only(category))
            }
            _ => None,
        }
    }
}

impl Default for CategoryVocabulary {
    fn default() -> Self {
        Self::new([
            "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison",
            "ground", "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel",
            "fairy",
        ])
    }
}
