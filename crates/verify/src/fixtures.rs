//! Known records of the dataset.
//!
//! Fixtures hold the literal values scenarios compare against. They are
//! captured from the live service and may need re-capturing if the dataset
//! changes.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::AssertionFailure;
use crate::schema::{Character, Entity, Film, ResourceKind};
use crate::verify::{verify_character_details, verify_film_details};

/// Number of `people` records matched by a whitespace-only search term.
pub const WHITESPACE_PEOPLE_COUNT: u64 = 82;

/// Expected values for one record type.
pub trait Fixture {
    /// The record type this fixture describes.
    type Entity: Entity;

    /// Checks every tracked field of `actual`.
    fn verify(&self, actual: &Self::Entity) -> Result<(), AssertionFailure>;
}

/// Expected values of a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterFixture {
    /// Dataset id, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Expected `name`.
    pub name: String,
    /// Expected `hair_color`.
    pub hair_color: String,
    /// Expected `eye_color`.
    pub eye_color: String,
}

impl CharacterFixture {
    /// Creates a character fixture with unknown colors.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            hair_color: "unknown".to_string(),
            eye_color: "unknown".to_string(),
        }
    }

    /// Sets the dataset id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets hair color.
    pub fn with_hair_color(mut self, hair_color: impl Into<String>) -> Self {
        self.hair_color = hair_color.into();
        self
    }

    /// Sets eye color.
    pub fn with_eye_color(mut self, eye_color: impl Into<String>) -> Self {
        self.eye_color = eye_color.into();
        self
    }

    /// Converts to the JSON the service returns.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "hair_color": self.hair_color,
            "eye_color": self.eye_color,
        })
    }
}

impl Fixture for CharacterFixture {
    type Entity = Character;

    fn verify(&self, actual: &Character) -> Result<(), AssertionFailure> {
        verify_character_details(actual, &self.name, &self.hair_color, &self.eye_color)
    }
}

/// Expected values of a film.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmFixture {
    /// Dataset id, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Expected `title`.
    pub title: String,
    /// Expected `episode_id`.
    pub episode_id: i64,
}

impl FilmFixture {
    /// Creates a film fixture.
    pub fn new(title: impl Into<String>, episode_id: i64) -> Self {
        Self {
            id: None,
            title: title.into(),
            episode_id,
        }
    }

    /// Sets the dataset id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Converts to the JSON the service returns.
    pub fn to_json(&self) -> Value {
        json!({
            "title": self.title,
            "episode_id": self.episode_id,
        })
    }
}

impl Fixture for FilmFixture {
    type Entity = Film;

    fn verify(&self, actual: &Film) -> Result<(), AssertionFailure> {
        verify_film_details(actual, &self.title, self.episode_id)
    }
}

/// A fixture of any typed record kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityFixture {
    /// A `people` record.
    Character(CharacterFixture),
    /// A `films` record.
    Film(FilmFixture),
}

impl EntityFixture {
    /// The collection the fixture belongs to.
    pub fn kind(&self) -> ResourceKind {
        match self {
            EntityFixture::Character(_) => Character::KIND,
            EntityFixture::Film(_) => Film::KIND,
        }
    }

    /// Human-readable name of the record.
    pub fn label(&self) -> &str {
        match self {
            EntityFixture::Character(c) => &c.name,
            EntityFixture::Film(f) => &f.title,
        }
    }
}

impl From<CharacterFixture> for EntityFixture {
    fn from(fixture: CharacterFixture) -> Self {
        EntityFixture::Character(fixture)
    }
}

impl From<FilmFixture> for EntityFixture {
    fn from(fixture: FilmFixture) -> Self {
        EntityFixture::Film(fixture)
    }
}

/// People id 1.
pub fn luke_skywalker() -> CharacterFixture {
    CharacterFixture::new("Luke Skywalker")
        .with_id(1)
        .with_hair_color("blond")
        .with_eye_color("blue")
}

/// People id 4.
pub fn darth_vader() -> CharacterFixture {
    CharacterFixture::new("Darth Vader")
        .with_id(4)
        .with_hair_color("none")
        .with_eye_color("yellow")
}

/// People id 5.
pub fn leia_organa() -> CharacterFixture {
    CharacterFixture::new("Leia Organa")
        .with_id(5)
        .with_hair_color("brown")
        .with_eye_color("brown")
}

/// Films id 1, episode IV.
pub fn a_new_hope() -> FilmFixture {
    FilmFixture::new("A New Hope", 4).with_id(1)
}

/// Films id 2, episode V.
pub fn the_empire_strikes_back() -> FilmFixture {
    FilmFixture::new("The Empire Strikes Back", 5).with_id(2)
}

/// Films id 5, episode II.
pub fn attack_of_the_clones() -> FilmFixture {
    FilmFixture::new("Attack of the Clones", 2).with_id(5)
}

/// Collection of dataset fixtures.
#[derive(Debug, Clone, Default)]
pub struct DatasetFixtures {
    /// Character fixtures.
    pub characters: Vec<CharacterFixture>,
    /// Film fixtures.
    pub films: Vec<FilmFixture>,
}

impl DatasetFixtures {
    /// Creates empty fixtures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record the built-in scenarios refer to.
    pub fn known() -> Self {
        Self {
            characters: vec![luke_skywalker(), darth_vader(), leia_organa()],
            films: vec![a_new_hope(), the_empire_strikes_back(), attack_of_the_clones()],
        }
    }

    /// Looks up a character by dataset id.
    pub fn character(&self, id: i64) -> Option<&CharacterFixture> {
        self.characters.iter().find(|c| c.id == Some(id))
    }

    /// Looks up a film by dataset id.
    pub fn film(&self, id: i64) -> Option<&FilmFixture> {
        self.films.iter().find(|f| f.id == Some(id))
    }
}
