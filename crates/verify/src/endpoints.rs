//! Endpoint URI builders.
//!
//! Pure functions from a resource kind (plus an optional id or search term)
//! to a request path relative to the configured base address. No validation
//! happens here: absent ids and degenerate search terms are the server's
//! concern.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::schema::ResourceKind;

/// Bytes escaped in search terms: everything except RFC 3986 unreserved
/// characters.
const SEARCH_TERM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Path listing every record of a collection: `/{kind}/`.
pub fn list_path(kind: ResourceKind) -> String {
    format!("/{}/", kind)
}

/// Path of a single record: `/{kind}/{id}`.
pub fn item_path(kind: ResourceKind, id: i64) -> String {
    format!("/{}/{}", kind, id)
}

/// Path of a search: `/{kind}/?search={term}` with the term percent-encoded.
pub fn search_path(kind: ResourceKind, term: &str) -> String {
    format!("/{}/?search={}", kind, encode_search_term(term))
}

/// Percent-encodes a search term. Spaces become `%20`, never `+`.
pub fn encode_search_term(term: &str) -> String {
    utf8_percent_encode(term, SEARCH_TERM).to_string()
}
