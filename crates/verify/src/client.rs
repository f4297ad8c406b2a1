//! HTTP client for the dataset.
//!
//! [`SwapiClient`] issues one blocking-for-the-caller GET per call using the
//! shared [`ClientConfig`]: base address, timeout, and status policy. A
//! status the policy refuses turns into [`VerifyError::RejectedStatus`];
//! everything else (404 included) comes back as an [`ApiResponse`].

use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::endpoints::{item_path, list_path, search_path};
use crate::error::{VerifyError, VerifyResult};
use crate::schema::ResourceKind;

/// A response the status policy accepted.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    url: String,
    status: u16,
    body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a response from its parts.
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// The full URL that was requested.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The raw response body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> VerifyResult<T> {
        serde_json::from_slice(&self.body).map_err(|source| VerifyError::MalformedResponse {
            url: self.url.clone(),
            source,
        })
    }
}

/// Client bound to one configuration.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct SwapiClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl SwapiClient {
    /// Builds a client from the configuration.
    pub fn new(config: ClientConfig) -> VerifyResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(VerifyError::ClientBuild)?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issues `GET {base_url}{path}`.
    pub async fn get(&self, path: &str) -> VerifyResult<ApiResponse> {
        let url = self.config.request_url(path);
        let started = Instant::now();

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| VerifyError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status().as_u16();
        debug!(
            url = %url,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Received response"
        );

        if !self.config.status_policy.accepts(status) {
            warn!(
                url = %url,
                status,
                policy = self.config.status_policy.name(),
                "Status rejected by policy"
            );
            return Err(VerifyError::RejectedStatus { url, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| VerifyError::Transport {
                url: url.clone(),
                source,
            })?;

        Ok(ApiResponse::new(url, status, body.to_vec()))
    }

    /// Fetches one record by id.
    pub async fn fetch(&self, kind: ResourceKind, id: i64) -> VerifyResult<ApiResponse> {
        self.get(&item_path(kind, id)).await
    }

    /// Searches a collection.
    pub async fn search(&self, kind: ResourceKind, term: &str) -> VerifyResult<ApiResponse> {
        self.get(&search_path(kind, term)).await
    }

    /// Lists the first page of a collection.
    pub async fn list(&self, kind: ResourceKind) -> VerifyResult<ApiResponse> {
        self.get(&list_path(kind)).await
    }
}
