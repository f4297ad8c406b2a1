//! Stub dataset server for integration tests.
//!
//! Serves [`Dataset`] under `/api` with the same URL layout, pagination and
//! 404 body as the live service, so every scenario can run without network
//! access.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use swapi_verify::ResourceKind;
use swapi_verify::endpoints::encode_search_term;
use tokio::task::JoinHandle;

use super::dataset::Dataset;

/// Records per page.
pub const PAGE_SIZE: usize = 10;

/// How the stub answers every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Serve the dataset.
    Healthy,
    /// Answer every request with this status.
    Status(u16),
    /// Wait before serving the dataset.
    Slow(Duration),
}

struct StubState {
    dataset: Dataset,
    behavior: Behavior,
    base_url: String,
}

/// A running stub server.
pub struct TestServer {
    /// Address of the server root, without the `/api` prefix.
    pub base_url: String,
    pub handle: JoinHandle<()>,
}

impl TestServer {
    /// Spawns a healthy server over the standard dataset.
    pub async fn spawn() -> Self {
        Self::spawn_with(Dataset::standard(), Behavior::Healthy).await
    }

    /// Spawns a server that misbehaves in the given way.
    #[allow(dead_code)]
    pub async fn spawn_with_behavior(behavior: Behavior) -> Self {
        Self::spawn_with(Dataset::standard(), behavior).await
    }

    /// Spawns a server over a custom dataset.
    pub async fn spawn_with(dataset: Dataset, behavior: Behavior) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}:{}", addr.ip(), addr.port());

        let state = Arc::new(StubState {
            dataset,
            behavior,
            base_url: base_url.clone(),
        });
        let app = Router::new()
            .route("/api/{kind}/", get(collection))
            .route("/api/{kind}/{id}", get(item))
            .with_state(state);

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { base_url, handle }
    }

    /// The dataset root, as configured on a client.
    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found" }))).into_response()
}

async fn misbehave(behavior: Behavior) -> Option<Response> {
    match behavior {
        Behavior::Healthy => None,
        Behavior::Status(code) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Some((status, Json(json!({ "detail": "Stub failure" }))).into_response())
        }
        Behavior::Slow(delay) => {
            tokio::time::sleep(delay).await;
            None
        }
    }
}

fn parse_kind(kind: &str) -> Option<ResourceKind> {
    ResourceKind::ALL.into_iter().find(|k| k.as_str() == kind)
}

async fn collection(
    State(state): State<Arc<StubState>>,
    Path(kind): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(response) = misbehave(state.behavior).await {
        return response;
    }
    let Some(kind) = parse_kind(&kind) else {
        return not_found();
    };

    let term = params.get("search").map(String::as_str);
    let page: usize = match params.get("page").map(|p| p.parse()) {
        None => 1,
        Some(Ok(page)) if page >= 1 => page,
        Some(_) => return not_found(),
    };

    let matches = state.dataset.search(kind, term);
    let start = (page - 1) * PAGE_SIZE;
    if start > 0 && start >= matches.len() {
        return not_found();
    }

    let link = |page: usize| {
        let mut url = format!("{}/api/{}/?page={}", state.base_url, kind, page);
        if let Some(term) = term {
            url.push_str("&search=");
            url.push_str(&encode_search_term(term));
        }
        url
    };
    let results: Vec<Value> = matches
        .iter()
        .skip(start)
        .take(PAGE_SIZE)
        .map(|r| r.body.clone())
        .collect();
    let next = (start + PAGE_SIZE < matches.len()).then(|| link(page + 1));
    let previous = (page > 1).then(|| link(page - 1));

    Json(json!({
        "count": matches.len(),
        "next": next,
        "previous": previous,
        "results": results,
    }))
    .into_response()
}

async fn item(
    State(state): State<Arc<StubState>>,
    Path((kind, id)): Path<(String, String)>,
) -> Response {
    if let Some(response) = misbehave(state.behavior).await {
        return response;
    }
    let record = parse_kind(&kind)
        .zip(id.parse::<i64>().ok())
        .and_then(|(kind, id)| state.dataset.get(kind, id));

    match record {
        Some(record) => Json(record.body.clone()).into_response(),
        None => not_found(),
    }
}
