//! Built-in scenario catalog.
//!
//! | Category | people | films |
//! |----------|--------|-------|
//! | fetch by id | 1, 5 | 1, 2 |
//! | absent id → 404 | -1, 0 | 0, -1 |
//! | unique search | "Luke Skyw", "Darth V" | "Empire ", "Clones" |
//! | no match | "Spider Man", "!@#$%^&*" | "Dolce vita", "!@#$%^&*" |
//! | whitespace term | " " → 82 | |
//! | list all | count > 0 | count > 0 |
//!
//! [`resources`] adds a list-all scenario for every other collection.

use crate::fixtures::{
    EntityFixture, WHITESPACE_PEOPLE_COUNT, a_new_hope, attack_of_the_clones, darth_vader,
    leia_organa, luke_skywalker, the_empire_strikes_back,
};
use crate::schema::ResourceKind;
use crate::scenario::{Expectation, Request, Scenario};

const SPECIAL_CHARACTERS: &str = "!@#$%^&*";

fn fetch(kind: ResourceKind, id: i64, fixture: impl Into<EntityFixture>) -> Scenario {
    let fixture = fixture.into();
    Scenario::new(
        format!("{}: fetch {} ({})", kind, id, fixture.label()),
        kind,
        Request::Fetch { id },
        Expectation::Entity(fixture),
    )
    .with_tags(&["fetch"])
}

fn fetch_missing(kind: ResourceKind, id: i64) -> Scenario {
    Scenario::new(
        format!("{}: fetch absent id {}", kind, id),
        kind,
        Request::Fetch { id },
        Expectation::Status(404),
    )
    .with_tags(&["fetch", "negative"])
}

fn search_unique(kind: ResourceKind, term: &str, fixture: impl Into<EntityFixture>) -> Scenario {
    let fixture = fixture.into();
    Scenario::new(
        format!("{}: search {:?} finds {}", kind, term, fixture.label()),
        kind,
        Request::Search {
            term: term.to_string(),
        },
        Expectation::SingleMatch(fixture),
    )
    .with_tags(&["search"])
}

fn search_count(kind: ResourceKind, term: &str, count: u64) -> Scenario {
    Scenario::new(
        format!("{}: search {:?} matches {}", kind, term, count),
        kind,
        Request::Search {
            term: term.to_string(),
        },
        Expectation::Count(count),
    )
    .with_tags(&["search"])
}

fn list_all(kind: ResourceKind) -> Scenario {
    Scenario::new(
        format!("{}: list all", kind),
        kind,
        Request::List,
        Expectation::NonEmpty,
    )
    .with_tags(&["list"])
}

/// Scenarios for the `people` collection.
pub fn people() -> Vec<Scenario> {
    let kind = ResourceKind::People;
    vec![
        fetch(kind, 1, luke_skywalker()),
        fetch(kind, 5, leia_organa()),
        fetch_missing(kind, -1),
        fetch_missing(kind, 0),
        search_unique(kind, "Luke Skyw", luke_skywalker()),
        search_unique(kind, "Darth V", darth_vader()),
        search_count(kind, "Spider Man", 0).with_tags(&["search", "negative"]),
        search_count(kind, SPECIAL_CHARACTERS, 0).with_tags(&["search", "negative"]),
        search_count(kind, " ", WHITESPACE_PEOPLE_COUNT)
            .with_tags(&["search", "degenerate"])
            .with_description("Dataset-specific count; re-capture if the dataset changes"),
        list_all(kind),
    ]
}

/// Scenarios for the `films` collection.
pub fn films() -> Vec<Scenario> {
    let kind = ResourceKind::Films;
    vec![
        fetch(kind, 1, a_new_hope()),
        fetch(kind, 2, the_empire_strikes_back()),
        fetch_missing(kind, 0),
        fetch_missing(kind, -1),
        search_unique(kind, "Empire ", the_empire_strikes_back()),
        search_unique(kind, "Clones", attack_of_the_clones()),
        search_count(kind, "Dolce vita", 0).with_tags(&["search", "negative"]),
        search_count(kind, SPECIAL_CHARACTERS, 0).with_tags(&["search", "negative"]),
        list_all(kind),
    ]
}

/// List-all scenarios for the collections without typed records.
pub fn resources() -> Vec<Scenario> {
    ResourceKind::ALL
        .into_iter()
        .filter(|kind| !matches!(kind, ResourceKind::People | ResourceKind::Films))
        .map(list_all)
        .collect()
}

/// Every built-in scenario.
pub fn all() -> Vec<Scenario> {
    let mut scenarios = people();
    scenarios.extend(films());
    scenarios.extend(resources());
    scenarios
}
