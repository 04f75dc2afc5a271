#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use folio_api::config::{ServerConfig, StoreMode};
use folio_api::router::build_app;
use folio_api::state::AppState;
use folio_db::{MemoryStore, PortfolioStore};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Origin allowed by [`test_config`].
pub const TEST_ORIGIN: &str = "http://localhost:3000";

/// Build a test `ServerConfig` with safe defaults: in-memory store, no
/// seeding, the default CORS allow-list and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        store_mode: StoreMode::Memory,
        seed_sample_data: false,
        ..ServerConfig::default()
    }
}

/// Build the full application router over `store`.
///
/// Uses the same [`build_app`] as the binaries so tests exercise the real
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery).
pub fn build_app_with(store: Arc<dyn PortfolioStore>, config: ServerConfig) -> Router {
    build_app(AppState::new(store, config))
}

/// Router over an empty in-memory store.
pub fn build_test_app() -> Router {
    build_app_with(Arc::new(MemoryStore::new()), test_config())
}

/// Router plus a handle on its store, for tests that share state across
/// requests.
pub fn build_test_app_with_store() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = build_app_with(store.clone(), test_config());
    (app, store)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST `body` to `uri`, assert 201, and return the created record's id.
pub async fn create(app: &Router, uri: &str, body: Value) -> i64 {
    let response = post_json(app.clone(), uri, body).await;
    assert_eq!(response.status(), 201, "create at {uri} failed");
    body_json(response).await["id"].as_i64().unwrap()
}
