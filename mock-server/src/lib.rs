//! Local stand-in for the backend on `:8080` that records every request.
//!
//! Routing mirrors what the real backend answers for the paths the fetch
//! client hits: `/health` returns `OK` and everything else gets the router's
//! plain-text 404. `/__requests` exposes the recorded log as JSON and is not
//! itself recorded.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// One request as it arrived at the server.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string, if any.
    pub path: String,
    /// Header names are lowercase; order is as received.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Shared, append-only log of recorded requests.
#[derive(Clone, Debug, Default)]
pub struct RequestLog(Arc<RwLock<Vec<RecordedRequest>>>);

impl RequestLog {
    pub async fn snapshot(&self) -> Vec<RecordedRequest> {
        self.0.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.0.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.0.read().await.is_empty()
    }

    async fn record(&self, method: &Method, uri: &Uri, headers: &HeaderMap, body: &Bytes) {
        let entry = RecordedRequest {
            method: method.as_str().to_string(),
            path: uri
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| uri.path().to_string()),
            headers: headers
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect(),
            body: String::from_utf8_lossy(body).into_owned(),
        };
        tracing::debug!(method = %entry.method, path = %entry.path, "recorded request");
        self.0.write().await.push(entry);
    }
}

pub fn app() -> Router {
    app_with_log(RequestLog::default())
}

pub fn app_with_log(log: RequestLog) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/__requests", get(list_requests))
        .fallback(not_found)
        .with_state(log)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_log(listener, RequestLog::default()).await
}

pub async fn run_with_log(listener: TcpListener, log: RequestLog) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_log(log)).await
}

async fn health(
    State(log): State<RequestLog>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> &'static str {
    log.record(&method, &uri, &headers, &body).await;
    "OK"
}

async fn not_found(
    State(log): State<RequestLog>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    log.record(&method, &uri, &headers, &body).await;
    (
        StatusCode::NOT_FOUND,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        NOT_FOUND_BODY,
    )
}

async fn list_requests(State(log): State<RequestLog>) -> Json<Vec<RecordedRequest>> {
    Json(log.snapshot().await)
}
