//! Verification functions.
//!
//! Field-level equality checks between received records and expected
//! literals. Each check stops at the first mismatch and reports the field
//! name together with both values.

use std::fmt::Display;

use crate::client::ApiResponse;
use crate::error::AssertionFailure;
use crate::schema::{Character, Film, SearchResult};

/// Compares one field against its expected value.
pub fn check_field<E, A>(field: &str, expected: &E, actual: &A) -> Result<(), AssertionFailure>
where
    E: Display + ?Sized,
    A: PartialEq<E> + Display + ?Sized,
{
    if actual == expected {
        Ok(())
    } else {
        Err(AssertionFailure::new(field, expected, actual))
    }
}

/// Asserts every tracked field of a character.
pub fn verify_character_details(
    character: &Character,
    name: &str,
    hair_color: &str,
    eye_color: &str,
) -> Result<(), AssertionFailure> {
    check_field("name", name, character.name.as_str())?;
    check_field("eye_color", eye_color, character.eye_color.as_str())?;
    check_field("hair_color", hair_color, character.hair_color.as_str())
}

/// Asserts every tracked field of a film.
pub fn verify_film_details(
    film: &Film,
    title: &str,
    episode_id: i64,
) -> Result<(), AssertionFailure> {
    check_field("title", title, film.title.as_str())?;
    check_field("episode_id", &episode_id, &film.episode_id)
}

/// Asserts that the response has the expected status code.
pub fn assert_status(response: &ApiResponse, expected: u16) -> Result<(), AssertionFailure> {
    check_field("status", &expected, &response.status())
}

/// Asserts the total number of matches reported by the server.
pub fn assert_count<T>(page: &SearchResult<T>, expected: u64) -> Result<(), AssertionFailure> {
    check_field("count", &expected, &page.count)
}

/// Asserts that the server reported at least one match.
pub fn assert_count_positive<T>(page: &SearchResult<T>) -> Result<(), AssertionFailure> {
    if page.count > 0 {
        Ok(())
    } else {
        Err(AssertionFailure::new("count", "> 0", page.count))
    }
}
