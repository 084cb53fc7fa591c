use catalog_cli::render;
use catalog_engine::{CatalogPage, CategoryFilter, FilterCriteria};
use catalog_favorites::{FavoritesStore, MemoryKeyValueStore};
use catalog_types::{CatalogError, EntityId, EntityRecord, ResolutionResult};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn id(n: u64) -> EntityId {
    EntityId::new(n)
}

fn bulbasaur() -> EntityRecord {
    EntityRecord::new(id(1), "bulbasaur")
        .with_image_url("https://img.example/1.png")
        .with_categories(["grass", "poison"])
        .with_stat("hp", 45)
        .with_stat("special-attack", 65)
        .with_abilities(["overgrow", "chlorophyll"])
}

fn charmander() -> EntityRecord {
    EntityRecord::new(id(4), "charmander").with_categories(["fire"])
}

fn favorites_with(ids: &[u64]) -> FavoritesStore {
    let mut store = FavoritesStore::open(Arc::new(MemoryKeyValueStore::new()));
    for n in ids {
        store.add(id(*n));
    }
    store
}

fn sample_page() -> CatalogPage {
    CatalogPage {
        results: vec![
            ResolutionResult::Resolved(Arc::new(bulbasaur())),
            ResolutionResult::Failed {
                id: id(2),
                reason: CatalogError::detail(id(2), "HTTP 500"),
            },
            ResolutionResult::Resolved(Arc::new(charmander())),
        ],
        next_cursor: Some("https://api.example/pokemon?offset=20&limit=20".to_string()),
    }
}

// ── Lines ────────────────────────────────────────────────────────

#[test]
fn record_line_shows_number_name_and_categories() {
    assert_eq!(
        render::record_line(&bulbasaur(), false),
        "#001 bulbasaur [grass, poison]"
    );
    assert_eq!(
        render::record_line(&charmander(), true),
        "#004 charmander [fire] ★"
    );
}

#[test]
fn record_line_without_categories() {
    let record = EntityRecord::new(id(132), "ditto");
    assert_eq!(render::record_line(&record, false), "#132 ditto");
}

// ── Pages ────────────────────────────────────────────────────────

#[test]
fn page_lists_matches_then_failures() {
    let out = render::page(&sample_page(), &FilterCriteria::any(), &favorites_with(&[4]));
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "#001 bulbasaur [grass, poison]");
    assert_eq!(lines[1], "#004 charmander [fire] ★");
    assert!(lines[2].starts_with("! #002 failed to load: "));
    assert!(out.contains("1 of 3 entries failed to load."));
    assert!(out.contains("Next page: https://api.example/pokemon?offset=20&limit=20"));
}

#[test]
fn failures_survive_filtering() {
    let criteria = FilterCriteria::new("char", CategoryFilter::All);
    let out = render::page(&sample_page(), &criteria, &favorites_with(&[]));

    assert!(!out.contains("bulbasaur"));
    assert!(out.contains("#004 charmander"));
    assert!(out.contains("! #002 failed to load"));
}

#[test]
fn no_match_is_reported_distinctly() {
    let criteria = FilterCriteria::new("", CategoryFilter::Only("dragon".to_string()));
    let out = render::page(&sample_page(), &criteria, &favorites_with(&[]));

    assert!(out.contains("No entries match the current filter."));
    assert!(out.contains("! #002 failed to load"));
}

#[test]
fn empty_page() {
    let out = render::page(&CatalogPage::default(), &FilterCriteria::any(), &favorites_with(&[]));
    assert_eq!(out, "No entries on this page.\n");
}

// ── Detail ───────────────────────────────────────────────────────

#[test]
fn detail_lists_stats_and_abilities() {
    let out = render::detail(&bulbasaur(), true);
    let expected = "\
#001 bulbasaur ★
Image: https://img.example/1.png
Types: grass, poison

Stats
  hp              45
  special-attack  65

Abilities
  - overgrow
  - chlorophyll
";
    assert_eq!(out, expected);
}

#[test]
fn detail_with_no_stats_or_abilities() {
    let out = render::detail(&EntityRecord::new(id(7), "squirtle"), false);
    assert_eq!(out, "#007 squirtle\n\nStats\n  (none)\n\nAbilities\n  (none)\n");
}

// ── Favorites and categories ─────────────────────────────────────

#[test]
fn empty_favorites_message() {
    assert_eq!(render::favorites(&[]), "You haven't added any favorites yet.\n");
}

#[test]
fn favorites_in_insertion_order() {
    assert_eq!(
        render::favorites(&[id(25), id(1)]),
        "#025  (catalog show 25)\n#001  (catalog show 1)\n"
    );
}

#[test]
fn categories_start_with_all() {
    let names = vec!["fire".to_string(), "water".to_string()];
    assert_eq!(render::categories(&names), "all\nfire\nwater\n");
}
