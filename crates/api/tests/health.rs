//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::routing::get as get_route;
use axum::Router;

use common::{body_json, get, send, TEST_ORIGIN};
use folio_api::router::{app_routes, with_middleware};
use folio_api::state::AppState;
use folio_db::MemoryStore;

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = common::build_test_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], "1.0.0");
    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404 with the requested path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Endpoint not found");
    assert_eq!(json["path"], "/api/v1/this-route-does-not-exist");
}

// ---------------------------------------------------------------------------
// Test: Unsupported method on a known path is also a JSON 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unsupported_method_returns_json_404() {
    let app = common::build_test_app();
    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/api/v1/projects/1")
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Endpoint not found");
    assert_eq!(json["path"], "/api/v1/projects/1");
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app();
    let response = get(app, "/health").await;

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );

    // The value should be a valid UUID (36 chars with hyphens).
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID string");
}

// ---------------------------------------------------------------------------
// Test: CORS preflight OPTIONS request returns correct headers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_returns_correct_headers() {
    let app = common::build_test_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/projects")
        .header("Origin", TEST_ORIGIN)
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], TEST_ORIGIN);
    assert_eq!(headers["access-control-allow-credentials"], "true");
    assert_eq!(headers["access-control-max-age"], "3600");
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "missing {method} in {methods}");
    }
}

// ---------------------------------------------------------------------------
// Test: Origins outside the allow-list get no CORS grant
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_rejects_unlisted_origin() {
    let app = common::build_test_app();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header("Origin", "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

async fn boom() -> &'static str {
    panic!("boom")
}

// ---------------------------------------------------------------------------
// Test: A panicking handler yields a JSON 500 and the service keeps serving
// ---------------------------------------------------------------------------

#[tokio::test]
async fn panic_is_converted_to_json_500() {
    let config = common::test_config();
    let state = AppState::new(Arc::new(MemoryStore::new()), config.clone());
    let routes = app_routes().merge(Router::<AppState>::new().route("/boom", get_route(boom)));
    let app = with_middleware(routes, &config).with_state(state);

    let response = get(app.clone(), "/boom").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "An internal error occurred");
    assert_eq!(json["code"], "INTERNAL_ERROR");

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}
