//! # swapi-verify - Verification harness for the Star Wars reference API
//!
//! This crate checks a public read-only REST dataset (`https://swapi.dev/api`)
//! by issuing GET requests and comparing the responses against known
//! records. Every check follows the same recipe: build an endpoint, fetch it,
//! assert on the status and the decoded body.
//!
//! ## Features
//!
//! - **Typed schema**: [`Character`], [`Film`] and the generic paginated
//!   [`SearchResult`] envelope
//! - **Shared configuration**: base address, timeout and an injectable
//!   [`StatusPolicy`] that turns 5xx responses into transport failures
//! - **Endpoint builders**: list, fetch-by-id and percent-encoded search paths
//! - **Data-driven scenarios**: a built-in [`catalog`] plus JSON suites
//!   loaded from disk
//! - **Runner**: sequential or parallel execution with filtering and a
//!   serializable [`RunReport`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use swapi_verify::{ClientConfig, Runner, SwapiClient, catalog};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SwapiClient::new(ClientConfig::from_env()?)?;
//!     let report = Runner::new(client).run(catalog::all()).await;
//!     assert!(report.all_passed());
//!     Ok(())
//! }
//! ```
//!
//! ## Endpoints
//!
//! | Request | Path |
//! |---------|------|
//! | list | `/{kind}/` |
//! | fetch | `/{kind}/{id}` |
//! | search | `/{kind}/?search={term}` |
//!
//! ## Error Handling
//!
//! | Failure | Error | Runner outcome |
//! |---------|-------|----------------|
//! | Status, count or field mismatch | [`VerifyError::Assertion`] | failed |
//! | Network error or timeout | [`VerifyError::Transport`] | errored |
//! | Status refused by the policy (5xx) | [`VerifyError::RejectedStatus`] | errored |
//! | Body missing expected fields | [`VerifyError::MalformedResponse`] | errored |
//!
//! ## Architecture
//!
//! - [`schema`] - Record shapes and resource kinds
//! - [`config`] - Client configuration
//! - [`policy`] - Status-acceptance policy
//! - [`endpoints`] - Endpoint URI builders
//! - [`client`] - HTTP client
//! - [`verify`] - Field-level verification functions
//! - [`fixtures`] - Known dataset records
//! - [`scenario`] - Scenario model
//! - [`catalog`] - Built-in scenarios
//! - [`suite`] - JSON suite loader
//! - [`runner`] - Scenario runner and report

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod catalog;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod fixtures;
pub mod policy;
pub mod runner;
pub mod scenario;
pub mod schema;
pub mod suite;
pub mod verify;

// Re-export commonly used types
pub use client::{ApiResponse, SwapiClient};
pub use config::ClientConfig;
pub use error::{AssertionFailure, VerifyError, VerifyResult};
pub use policy::StatusPolicy;
pub use runner::{Outcome, RunReport, Runner, ScenarioFilter, ScenarioResult};
pub use scenario::{Expectation, Request, Scenario};
pub use schema::{Character, Entity, Film, ResourceKind, SearchResult};

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level`.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "swapi_verify={},swapi_verify_cli={}",
            level, level
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
