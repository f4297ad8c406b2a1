//! Scenarios: one request plus the expectations on its response.
//!
//! A [`Scenario`] is a sequential recipe. It builds the endpoint, performs a
//! single GET, checks the status and, for successful responses, the decoded
//! body. Scenarios share no state and can run in any order.
//!
//! Scenarios are plain data and serialize to JSON:
//!
//! ```json
//! {
//!   "name": "fetch Luke Skywalker",
//!   "tags": ["fetch"],
//!   "resource": "people",
//!   "request": { "fetch": { "id": 1 } },
//!   "expect": { "entity": { "character": {
//!     "name": "Luke Skywalker", "hair_color": "blond", "eye_color": "blue"
//!   } } }
//! }
//! ```

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::client::{ApiResponse, SwapiClient};
use crate::endpoints::{item_path, list_path, search_path};
use crate::error::{AssertionFailure, VerifyResult};
use crate::fixtures::{EntityFixture, Fixture};
use crate::schema::{ResourceKind, SearchResult};
use crate::verify::{assert_count, assert_count_positive, assert_status};

/// Status every expectation other than [`Expectation::Status`] requires.
const OK: u16 = 200;

/// The request a scenario issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Request {
    /// `GET /{kind}/{id}`
    Fetch {
        /// Dataset id; not validated.
        id: i64,
    },
    /// `GET /{kind}/?search={term}`
    Search {
        /// Raw search text, encoded when the path is built.
        term: String,
    },
    /// `GET /{kind}/`
    List,
}

impl Request {
    /// Builds the request path for a collection.
    pub fn path(&self, kind: ResourceKind) -> String {
        match self {
            Request::Fetch { id } => item_path(kind, *id),
            Request::Search { term } => search_path(kind, term),
            Request::List => list_path(kind),
        }
    }
}

/// What the response must look like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// Only the status is checked; the body is never read.
    Status(u16),
    /// 200 and a single record matching the fixture.
    Entity(EntityFixture),
    /// 200, `count == 1`, and the only result matching the fixture.
    SingleMatch(EntityFixture),
    /// 200 and exactly this many matches.
    Count(u64),
    /// 200 and at least one match.
    NonEmpty,
}

impl Expectation {
    /// Checks a response against this expectation.
    pub fn check(&self, response: &ApiResponse) -> VerifyResult<()> {
        match self {
            Expectation::Status(expected) => Ok(assert_status(response, *expected)?),
            Expectation::Entity(EntityFixture::Character(fixture)) => {
                verify_item(fixture, response)
            }
            Expectation::Entity(EntityFixture::Film(fixture)) => verify_item(fixture, response),
            Expectation::SingleMatch(EntityFixture::Character(fixture)) => {
                verify_single_match(fixture, response)
            }
            Expectation::SingleMatch(EntityFixture::Film(fixture)) => {
                verify_single_match(fixture, response)
            }
            Expectation::Count(expected) => {
                let page = decode_page(response)?;
                Ok(assert_count(&page, *expected)?)
            }
            Expectation::NonEmpty => {
                let page = decode_page(response)?;
                Ok(assert_count_positive(&page)?)
            }
        }
    }

    fn fixture(&self) -> Option<&EntityFixture> {
        match self {
            Expectation::Entity(fixture) | Expectation::SingleMatch(fixture) => Some(fixture),
            _ => None,
        }
    }
}

/// Requires 200, then decodes a result page without reading its records.
fn decode_page(response: &ApiResponse) -> VerifyResult<SearchResult<IgnoredAny>> {
    assert_status(response, OK)?;
    response.json()
}

/// Requires 200, decodes a single record and checks it against the fixture.
pub fn verify_item<F: Fixture>(fixture: &F, response: &ApiResponse) -> VerifyResult<()> {
    assert_status(response, OK)?;
    let entity: F::Entity = response.json()?;
    fixture.verify(&entity)?;
    Ok(())
}

/// Requires 200, decodes a search page, requires exactly one match, and
/// checks it.
pub fn verify_single_match<F: Fixture>(fixture: &F, response: &ApiResponse) -> VerifyResult<()> {
    assert_status(response, OK)?;
    let page: SearchResult<F::Entity> = response.json()?;
    assert_count(&page, 1)?;
    let entity = page
        .first()
        .ok_or_else(|| AssertionFailure::new("results", "1 record", "empty page"))?;
    fixture.verify(entity)?;
    Ok(())
}

/// A named, independent verification case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique, human-readable name.
    pub name: String,
    /// Free-form notes.
    #[serde(default)]
    pub description: String,
    /// Labels used for filtering.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Collection the request targets.
    pub resource: ResourceKind,
    /// The request to issue.
    pub request: Request,
    /// What the response must look like.
    pub expect: Expectation,
}

impl Scenario {
    /// Creates a scenario.
    pub fn new(
        name: impl Into<String>,
        resource: ResourceKind,
        request: Request,
        expect: Expectation,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
            resource,
            request,
            expect,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets tags.
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Returns the request path.
    pub fn path(&self) -> String {
        self.request.path(self.resource)
    }

    /// Checks that the scenario is internally consistent.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Scenario name cannot be empty".to_string());
        }

        if let Some(fixture) = self.expect.fixture()
            && fixture.kind() != self.resource
        {
            return Err(format!(
                "Scenario '{}' targets {} but expects a {} record",
                self.name,
                self.resource,
                fixture.kind()
            ));
        }

        match (&self.request, &self.expect) {
            (Request::Fetch { .. }, Expectation::SingleMatch(_))
            | (Request::Fetch { .. }, Expectation::Count(_))
            | (Request::Fetch { .. }, Expectation::NonEmpty) => Err(format!(
                "Scenario '{}' fetches a single record but expects a result page",
                self.name
            )),
            (Request::Search { .. } | Request::List, Expectation::Entity(_)) => Err(format!(
                "Scenario '{}' requests a result page but expects a single record",
                self.name
            )),
            _ => Ok(()),
        }
    }

    /// Runs the scenario with its own request.
    pub async fn run(&self, client: &SwapiClient) -> VerifyResult<()> {
        let response = client.get(&self.path()).await?;
        self.expect.check(&response)
    }
}
