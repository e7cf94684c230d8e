use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cafe_dispatch::api::{build_app_router, AppState};
use cafe_dispatch::clock::ManualClock;
use cafe_dispatch::config::ServerConfig;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        max_simulation_cases: 5,
        ..ServerConfig::default()
    }
}

/// Build the full application router on a manual clock starting at 0.
///
/// Returns the state too, so tests can move the clock and inspect the
/// engine directly.
pub fn build_test_app() -> (Router, AppState, Arc<ManualClock>) {
    build_test_app_with(test_config())
}

/// Same as [`build_test_app`] with a custom configuration.
pub fn build_test_app_with(config: ServerConfig) -> (Router, AppState, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(0));
    let state = AppState::new(config.clone(), clock.clone()).unwrap();
    let app = build_app_router(state.clone(), &config);
    (app, state, clock)
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_empty(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
