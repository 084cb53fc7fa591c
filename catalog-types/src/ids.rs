//! Entity identifiers.
//!
//! The remote catalog numbers its entities; the string form of that number is
//! used both as a path segment on the API and as the local routing key.

use crate::error::CatalogError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier of a catalog entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates an entity ID from its numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Parses an entity ID from its string form.
    ///
    /// The id must be a non-empty run of ASCII digits that fits in a `u64`.
    /// Signs and whitespace, including surrounding whitespace, are rejected.
    pub fn parse(s: &str) -> Result<Self, CatalogError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CatalogError::InvalidIdentifier(s.to_string()));
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| CatalogError::InvalidIdentifier(s.to_string()))
    }

    /// Catalog number as shown in listings, zero-padded to three digits.
    #[must_use]
    pub fn padded(&self) -> String {
        format!("#{:03}", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => Self::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}
