//! Client configuration for the verification harness.
//!
//! One [`ClientConfig`] is built at startup and shared read-only by every
//! request. It can be constructed programmatically, from environment
//! variables, or from command line arguments (it is a `clap` argument group
//! that the runner binary flattens into its own parser).
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SWAPI_BASE_URL` | https://swapi.dev/api | Base address of the dataset |
//! | `SWAPI_TIMEOUT_MS` | 20000 | Per-request timeout (milliseconds) |
//! | `SWAPI_LOG_LEVEL` | info | Log level |
//! | `SWAPI_USER_AGENT` | swapi-verify/<version> | User-Agent header |
//!
//! # Example
//!
//! ```rust
//! use swapi_verify::ClientConfig;
//!
//! // Create from environment
//! let config = ClientConfig::from_env().expect("valid SWAPI_* variables");
//!
//! // Or point at a local mirror
//! let config = ClientConfig {
//!     base_url: "http://localhost:8000/api".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(config.request_url("/people/1"), "http://localhost:8000/api/people/1");
//! ```

use std::time::Duration;

use clap::{Args, Parser};

use crate::policy::StatusPolicy;

/// Base address of the public dataset.
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;

/// Default User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("swapi-verify/", env!("CARGO_PKG_VERSION"));

/// Connection parameters shared by every request.
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    /// Base address requests are issued against (path prefix is kept).
    #[arg(long, env = "SWAPI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in milliseconds.
    #[arg(long, env = "SWAPI_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "SWAPI_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// User-Agent header value.
    #[arg(long, env = "SWAPI_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Which response statuses are delivered instead of failing the request.
    #[arg(skip)]
    pub status_policy: StatusPolicy,
}

/// Parser used to read a [`ClientConfig`] from the environment alone.
#[derive(Parser)]
struct EnvOnly {
    #[command(flatten)]
    config: ClientConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            log_level: "info".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            status_policy: StatusPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration from environment variables.
    ///
    /// Command line arguments are ignored. Unset variables take their
    /// defaults; a variable that is set but does not parse is an error.
    pub fn from_env() -> Result<Self, clap::Error> {
        EnvOnly::try_parse_from([env!("CARGO_PKG_NAME")]).map(|parsed| parsed.config)
    }

    /// Creates a configuration suitable for tests against a local server.
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: 5_000,
            log_level: "debug".to_string(),
            ..Default::default()
        }
    }

    /// Replaces the status-acceptance policy.
    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Joins the base address and a request path.
    ///
    /// Plain concatenation: `Url::join` would drop the `/api` prefix.
    pub fn request_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match url::Url::parse(&self.base_url) {
            Ok(url) if !matches!(url.scheme(), "http" | "https") => {
                errors.push(format!("Base URL must be http or https: {}", self.base_url));
            }
            Ok(url) if url.query().is_some() || url.fragment().is_some() => {
                errors.push(format!(
                    "Base URL cannot carry a query or fragment: {}",
                    self.base_url
                ));
            }
            Ok(_) => {}
            Err(e) => errors.push(format!("Invalid base URL {}: {}", self.base_url, e)),
        }

        if self.timeout_ms == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.user_agent.trim().is_empty() {
            errors.push("User agent cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
