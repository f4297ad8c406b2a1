//! Status-acceptance policy.
//!
//! Decides which HTTP statuses are handed back to the caller as ordinary
//! responses and which abort the request as a transport-level failure.

use std::fmt;
use std::sync::Arc;

/// Predicate over HTTP status codes.
///
/// Cloning is cheap; clones share the same predicate.
#[derive(Clone)]
pub struct StatusPolicy {
    name: &'static str,
    accept: Arc<dyn Fn(u16) -> bool + Send + Sync>,
}

impl StatusPolicy {
    /// Builds a policy from an arbitrary predicate.
    pub fn from_fn<F>(name: &'static str, accept: F) -> Self
    where
        F: Fn(u16) -> bool + Send + Sync + 'static,
    {
        Self {
            name,
            accept: Arc::new(accept),
        }
    }

    /// Accepts every status below 500; 404 and other client errors are
    /// delivered normally.
    pub fn below_server_error() -> Self {
        Self::from_fn("below-server-error", |status| status < 500)
    }

    /// Accepts only 2xx statuses.
    pub fn success_only() -> Self {
        Self::from_fn("success-only", |status| (200..300).contains(&status))
    }

    /// Returns true if the status should be delivered to the caller.
    pub fn accepts(&self, status: u16) -> bool {
        (self.accept)(status)
    }

    /// Returns the policy name, used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self::below_server_error()
    }
}

impl fmt::Debug for StatusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusPolicy")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
