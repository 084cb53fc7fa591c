use catalog_engine::filter::{self, ALL_CATEGORIES};
use catalog_engine::{CategoryFilter, CategoryVocabulary, FilterCriteria};
use catalog_types::{EntityId, EntityRecord};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;

fn record(id: u64, name: &str, categories: &[&str]) -> Arc<EntityRecord> {
    Arc::new(EntityRecord::new(EntityId::new(id), name).with_categories(categories.iter().copied()))
}

fn names(records: &[Arc<EntityRecord>]) -> Vec<&str> {
    records.iter().map(|r| r.name()).collect()
}

fn sample() -> Vec<Arc<EntityRecord>> {
    vec![
        record(25, "Pikachu", &["electric"]),
        record(1, "Bulbasaur", &["grass", "poison"]),
        record(4, "Charmander", &["fire"]),
        record(2, "Ivysaur", &["grass", "poison"]),
    ]
}

// ── Scenarios ────────────────────────────────────────────────────

#[test]
fn query_matches_case_insensitive_substring() {
    let records = vec![
        record(25, "Pikachu", &["electric"]),
        record(1, "Bulbasaur", &["grass", "poison"]),
    ];
    let out = filter::apply(&records, &FilterCriteria::new("bulb", CategoryFilter::All));
    assert_eq!(names(&out), vec!["Bulbasaur"]);
}

#[test]
fn uppercase_query_matches_lowercase_name() {
    let records = vec![record(1, "bulbasaur", &["grass"])];
    let out = filter::apply(&records, &FilterCriteria::new("SAUR", CategoryFilter::All));
    assert_eq!(out.len(), 1);
}

#[test]
fn category_filter_is_exact() {
    let records = sample();
    let grass = filter::apply(
        &records,
        &FilterCriteria::new("", CategoryFilter::Only("grass".into())),
    );
    assert_eq!(names(&grass), vec!["Bulbasaur", "Ivysaur"]);

    let capitalized = filter::apply(
        &records,
        &FilterCriteria::new("", CategoryFilter::Only("Grass".into())),
    );
    assert!(capitalized.is_empty());
}

#[test]
fn query_and_category_are_anded() {
    let records = sample();
    let out = filter::apply(
        &records,
        &FilterCriteria::new("ivy", CategoryFilter::Only("poison".into())),
    );
    assert_eq!(names(&out), vec!["Ivysaur"]);

    let none = filter::apply(
        &records,
        &FilterCriteria::new("pika", CategoryFilter::Only("poison".into())),
    );
    assert!(none.is_empty());
}

#[test]
fn any_criteria_returns_input() {
    let records = sample();
    assert_eq!(filter::apply(&records, &FilterCriteria::any()), records);
}

#[test]
fn empty_input_gives_empty_output() {
    assert!(filter::apply(&[], &FilterCriteria::new("x", CategoryFilter::All)).is_empty());
}

#[test]
fn input_is_not_mutated() {
    let records = sample();
    let before = records.clone();
    let _ = filter::apply(&records, &FilterCriteria::new("char", CategoryFilter::All));
    assert_eq!(records, before);
}

// ── Vocabulary ───────────────────────────────────────────────────

#[test]
fn default_vocabulary_has_full_type_list() {
    let vocab = CategoryVocabulary::default();
    assert_eq!(vocab.categories().len(), 18);
    assert!(vocab.contains("fairy"));
    assert!(!vocab.contains(ALL_CATEGORIES));
}

#[test]
fn vocabulary_parses_filters() {
    let vocab = CategoryVocabulary::new(["normal", "fire", "water"]);
    assert_eq!(vocab.parse_filter("all"), Some(CategoryFilter::All));
    assert_eq!(
        vocab.parse_filter("fire"),
        Some(CategoryFilter::Only("fire".to_string()))
    );
    assert_eq!(vocab.parse_filter("grass"), None);
    assert_eq!(vocab.parse_filter("Fire"), None);
}

#[test]
fn vocabulary_deduplicates() {
    let vocab = CategoryVocabulary::new(["fire", "water", "fire"]);
    assert_eq!(vocab.categories(), ["fire", "water"]);
}

#[test]
fn vocabulary_deserializes_from_list() {
    let vocab: CategoryVocabulary = serde_json::from_str(r#"["bug","rock"]"#).unwrap();
    assert_eq!(vocab, CategoryVocabulary::new(["bug", "rock"]));
}

// ── Properties ───────────────────────────────────────────────────

fn category_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["fire", "water", "grass", "poison", "Fire"]).prop_map(String::from)
}

fn records_strategy() -> impl Strategy<Value = Vec<Arc<EntityRecord>>> {
    prop::collection::vec(
        (
            "[a-zA-Z]{0,10}",
            prop::collection::vec(category_strategy(), 0..3),
        ),
        0..20,
    )
    .prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (name, cats))| {
                Arc::new(EntityRecord::new(EntityId::new(i as u64), name).with_categories(cats))
            })
            .collect()
    })
}

fn criteria_strategy() -> impl Strategy<Value = FilterCriteria> {
    (
        "[a-zA-Z]{0,3}",
        prop::option::of(category_strategy()),
    )
        .prop_map(|(query, category)| {
            FilterCriteria::new(query, category.map_or(CategoryFilter::All, CategoryFilter::Only))
        })
}

proptest! {
    /// Output is an order-preserving subsequence of the input.
    #[test]
    fn output_is_ordered_subsequence(
        records in records_strategy(),
        criteria in criteria_strategy(),
    ) {
        let out = filter::apply(&records, &criteria);
        let mut remaining = records.iter();
        for kept in &out {
            prop_assert!(remaining.any(|r| Arc::ptr_eq(r, kept)));
        }
        prop_assert!(out.len() <= records.len());
    }

    /// Every kept record matches and every dropped record does not.
    #[test]
    fn output_is_exactly_the_matches(
        records in records_strategy(),
        criteria in criteria_strategy(),
    ) {
        let out = filter::apply(&records, &criteria);
        let expected: Vec<_> = records.iter().filter(|r| criteria.matches(r)).cloned().collect();
        prop_assert_eq!(out, expected);
    }

    /// Empty query with all categories is the identity.
    #[test]
    fn match_everything_is_identity(records in records_strategy()) {
        let out = filter::apply(&records, &FilterCriteria::new("", CategoryFilter::All));
        prop_assert_eq!(out, records);
    }

    /// Applying the same criteria twice changes nothing.
    #[test]
    fn apply_is_idempotent(records in records_strategy(), criteria in criteria_strategy()) {
        let once = filter::apply(&records, &criteria);
        let twice = filter::apply(&once, &criteria);
        prop_assert_eq!(once, twice);
    }
}
