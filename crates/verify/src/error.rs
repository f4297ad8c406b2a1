//! Error types for the verification harness.
//!
//! Errors are split along the line the runner cares about: an
//! [`AssertionFailure`] means the service answered but behaved differently
//! from the fixture, everything else means the service (or the network) could
//! not be consulted at all.
//!
//! | Variant | Cause | Runner outcome |
//! |---------|-------|----------------|
//! | `Assertion` | status, count or field mismatch | failed |
//! | `Transport` | connection error, timeout | errored |
//! | `RejectedStatus` | status policy refused the status (5xx) | errored |
//! | `MalformedResponse` | body did not decode into the expected shape | errored |

// Variant fields are described by their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// Result alias used throughout the crate.
pub type VerifyResult<T> = Result<T, VerifyError>;

/// An observed value did not equal the expected literal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{subject}: expected {expected}, got {actual}")]
pub struct AssertionFailure {
    /// What was compared (`status`, `count`, or an entity field name).
    pub subject: String,
    /// The expected literal, rendered for display.
    pub expected: String,
    /// The observed value, rendered for display.
    pub actual: String,
}

impl AssertionFailure {
    /// Builds a failure from any two displayable values.
    pub fn new(
        subject: impl Into<String>,
        expected: impl std::fmt::Display,
        actual: impl std::fmt::Display,
    ) -> Self {
        Self {
            subject: subject.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// The primary error type for harness operations.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The response did not match expectations.
    #[error("assertion failed: {0}")]
    Assertion(#[from] AssertionFailure),

    /// The HTTP client could not be constructed from the configuration.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request never produced a response (network error or timeout).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The status policy refused the response status.
    #[error("request to {url} returned unacceptable status {status}")]
    RejectedStatus { url: String, status: u16 },

    /// The response body could not be decoded.
    #[error("malformed response from {url}: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl VerifyError {
    /// Returns true when the error is a behavioral mismatch rather than a
    /// failure to reach or understand the service.
    pub fn is_assertion(&self) -> bool {
        matches!(self, VerifyError::Assertion(_))
    }

    /// Returns true when the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, VerifyError::Transport { source, .. } if source.is_timeout())
    }
}
