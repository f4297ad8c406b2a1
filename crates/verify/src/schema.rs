//! Resource schema definitions.
//!
//! Shapes of the records returned by the dataset. Only the tracked fields
//! are declared; anything else the server sends is ignored on decode.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Top-level collections exposed by the dataset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Characters.
    People,
    /// Films.
    Films,
    /// Planets.
    Planets,
    /// Species.
    Species,
    /// Starships.
    Starships,
    /// Vehicles.
    Vehicles,
}

impl ResourceKind {
    /// Every collection, in the order the dataset root lists them.
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::People,
        ResourceKind::Planets,
        ResourceKind::Films,
        ResourceKind::Species,
        ResourceKind::Vehicles,
        ResourceKind::Starships,
    ];

    /// Returns the URL path segment for this collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::People => "people",
            ResourceKind::Films => "films",
            ResourceKind::Planets => "planets",
            ResourceKind::Species => "species",
            ResourceKind::Starships => "starships",
            ResourceKind::Vehicles => "vehicles",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed record of one collection.
pub trait Entity: DeserializeOwned + fmt::Debug + Send + Sync + 'static {
    /// The collection records of this type live in.
    const KIND: ResourceKind;
}

/// A character from the `people` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// The name of the character.
    pub name: String,
    /// Hair color, or `"n/a"`/`"none"` for characters without hair.
    pub hair_color: String,
    /// Eye color.
    pub eye_color: String,
}

impl Entity for Character {
    const KIND: ResourceKind = ResourceKind::People;
}

/// A film from the `films` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    /// The title of the film.
    pub title: String,
    /// The episode number (not the release order).
    pub episode_id: i64,
}

impl Entity for Film {
    const KIND: ResourceKind = ResourceKind::Films;
}

/// One page of a list or search response.
///
/// `count` is the total number of matches on the server, not the length of
/// `results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<T> {
    /// Total number of matching records.
    pub count: u64,
    /// Link to the next page, absent on the last page.
    #[serde(default)]
    pub next: Option<String>,
    /// Link to the previous page, absent on the first page.
    #[serde(default)]
    pub previous: Option<String>,
    /// Records on this page, in server order.
    pub results: Vec<T>,
}

impl<T> SearchResult<T> {
    /// Returns true if the server reported no matches.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the first record on the page.
    pub fn first(&self) -> Option<&T> {
        self.results.first()
    }

    /// Returns true if more pages follow this one.
    pub fn has_next_page(&self) -> bool {
        self.next.as_deref().is_some_and(|link| !link.is_empty())
    }
}
