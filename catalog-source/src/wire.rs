//! Remote API response structures.

use catalog_types::{CatalogError, CatalogResult, EntityId, EntityRecord, EntityReference};
use serde::Deserialize;
use tracing::warn;

/// List endpoint response.
#[derive(Debug, Deserialize)]
pub(crate) struct ListPayload {
    #[serde(default)]
    pub results: Option<Vec<ListItem>>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListItem {
    #[serde(default)]
    id: Option<EntityId>,
    #[serde(default, alias = "detailUrl")]
    url: Option<String>,
}

impl ListItem {
    /// Converts a list item into a reference.
    ///
    /// Items without an explicit id take it from the last path segment of
    /// their detail URL; items without a URL are addressed through `locate`.
    pub fn into_reference(
        self,
        locate: impl Fn(EntityId) -> String,
    ) -> Result<EntityReference, String> {
        let url = self.url.filter(|u| !u.trim().is_empty());
        let id = match (self.id, url.as_deref()) {
            (Some(id), _) => id,
            (None, Some(url)) => id_from_url(url)
                .ok_or_else(|| format!("no usable id in list item url {url:?}"))?,
            (None, None) => return Err("list item has neither id nor url".to_string()),
        };
        let locator = url.unwrap_or_else(|| locate(id));
        Ok(EntityReference::new(id, locator))
    }
}

fn id_from_url(url: &str) -> Option<EntityId> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .and_then(|segment| EntityId::parse(segment).ok())
}

/// Detail document.
#[derive(Debug, Deserialize)]
pub(crate) struct DetailPayload {
    #[serde(default)]
    id: Option<EntityId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    sprites: Option<Sprites>,
    #[serde(default)]
    types: Option<Vec<TypeSlot>>,
    #[serde(default)]
    stats: Option<Vec<StatSlot>>,
    #[serde(default)]
    abilities: Option<Vec<AbilitySlot>>,
}

#[derive(Debug, Deserialize)]
struct Sprites {
    #[serde(default)]
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
struct StatSlot {
    stat: NamedResource,
    base_stat: i64,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
}

impl DetailPayload {
    /// Validates the payload against the reference id and builds the record.
    pub fn into_record(self, expected: EntityId) -> CatalogResult<EntityRecord> {
        match self.id {
            Some(id) if id == expected => {}
            Some(id) => {
                return Err(CatalogError::detail(
                    expected,
                    format!("payload id {id} does not match requested id"),
                ));
            }
            None => return Err(CatalogError::detail(expected, "payload has no id")),
        }

        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| CatalogError::detail(expected, "payload has no name"))?;

        let image_url = self
            .sprites
            .and_then(|s| s.front_default)
            .unwrap_or_default();

        let mut record = EntityRecord::new(expected, name)
            .with_image_url(image_url)
            .with_categories(
                self.types
                    .unwrap_or_default()
                    .into_iter()
                    .map(|slot| slot.kind.name),
            )
            .with_abilities(
                self.abilities
                    .unwrap_or_default()
                    .into_iter()
                    .map(|slot| slot.ability.name),
            );

        for slot in self.stats.unwrap_or_default() {
            if let Some(previous) = record.stat(&slot.stat.name) {
                warn!(
                    id = %expected,
                    stat = %slot.stat.name,
                    previous,
                    value = slot.base_stat,
                    "Duplicate stat in detail payload, keeping last value"
                );
            }
            record = record.with_stat(slot.stat.name, slot.base_stat);
        }

        Ok(record)
    }
}
