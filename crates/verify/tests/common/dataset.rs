//! In-memory dataset served by the stub server.
//!
//! The known fixtures sit at their real ids; the `people` collection is
//! padded with filler records so it holds exactly
//! [`WHITESPACE_PEOPLE_COUNT`] entries, with the same gap at id 17 the live
//! dataset has.

use std::collections::HashMap;

use serde_json::{Value, json};
use swapi_verify::ResourceKind;
use swapi_verify::fixtures::{DatasetFixtures, WHITESPACE_PEOPLE_COUNT};

/// Id missing from the live `people` collection.
pub const MISSING_PERSON_ID: i64 = 17;

/// One stored record.
#[derive(Debug, Clone)]
pub struct Record {
    pub id: i64,
    pub body: Value,
}

impl Record {
    /// The searchable field: `title` for films, `name` for everything else.
    pub fn label(&self) -> &str {
        self.body
            .get("title")
            .or_else(|| self.body.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// Records grouped by collection, ordered by id.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    collections: HashMap<ResourceKind, Vec<Record>>,
}

impl Dataset {
    /// The dataset mirroring the known fixtures.
    pub fn standard() -> Self {
        let fixtures = DatasetFixtures::known();
        let mut dataset = Self::default();

        let mut id = 0;
        let mut people = 0;
        while people < WHITESPACE_PEOPLE_COUNT {
            id += 1;
            if id == MISSING_PERSON_ID {
                continue;
            }
            let body = match fixtures.character(id) {
                Some(fixture) => fixture.to_json(),
                None => json!({
                    "name": format!("Extra {}", id),
                    "hair_color": "n/a",
                    "eye_color": "unknown",
                }),
            };
            dataset.insert(ResourceKind::People, id, body);
            people += 1;
        }

        let films = [
            (1, "A New Hope", 4),
            (2, "The Empire Strikes Back", 5),
            (3, "Return of the Jedi", 6),
            (4, "The Phantom Menace", 1),
            (5, "Attack of the Clones", 2),
            (6, "Revenge of the Sith", 3),
        ];
        for (id, title, episode_id) in films {
            let body = match fixtures.film(id) {
                Some(fixture) => fixture.to_json(),
                None => json!({ "title": title, "episode_id": episode_id }),
            };
            dataset.insert(ResourceKind::Films, id, body);
        }

        dataset.insert_names(ResourceKind::Planets, &["Tatooine", "Alderaan", "Yavin IV", "Hoth"]);
        dataset.insert_names(ResourceKind::Species, &["Human", "Droid", "Wookie"]);
        dataset.insert_names(
            ResourceKind::Starships,
            &["CR90 corvette", "Star Destroyer", "Sentinel-class landing craft", "Death Star"],
        );
        dataset.insert_names(ResourceKind::Vehicles, &["Sand Crawler", "T-16 skyhopper"]);

        dataset
    }

    /// Adds a record.
    pub fn insert(&mut self, kind: ResourceKind, id: i64, body: Value) {
        let records = self.collections.entry(kind).or_default();
        records.push(Record { id, body });
        records.sort_by_key(|r| r.id);
    }

    fn insert_names(&mut self, kind: ResourceKind, names: &[&str]) {
        for (index, name) in names.iter().enumerate() {
            self.insert(kind, index as i64 + 1, json!({ "name": name }));
        }
    }

    /// Every record of a collection.
    pub fn records(&self, kind: ResourceKind) -> &[Record] {
        self.collections.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Looks up one record.
    pub fn get(&self, kind: ResourceKind, id: i64) -> Option<&Record> {
        self.records(kind).iter().find(|r| r.id == id)
    }

    /// Case-insensitive substring search; a blank term matches everything.
    pub fn search(&self, kind: ResourceKind, term: Option<&str>) -> Vec<&Record> {
        let needle = term
            .filter(|t| !t.trim().is_empty())
            .map(str::to_lowercase);

        self.records(kind)
            .iter()
            .filter(|r| match &needle {
                Some(needle) => r.label().to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .collect()
    }
}
