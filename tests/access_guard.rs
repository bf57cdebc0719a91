//! Integration tests for the path authorization guard and credential
//! channels.

mod helpers;

use axum::http::StatusCode;
use helpers::TestApp;
use serde_json::json;

#[tokio::test]
async fn status_endpoint_is_public() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/status", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": "OK" }));
}

#[tokio::test]
async fn bearer_header_carries_the_session() {
    let app = TestApp::new();
    app.register("bearer@example.com", "pw").await;
    let token = app.login("bearer@example.com", "pw").await;

    let response = app.request_with_bearer("GET", "/api/profile", &token).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "email": "bearer@example.com" }));

    let response = app
        .request_with_bearer("GET", "/api/profile", "not-a-session")
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_paths_fail_closed_without_a_session() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/nonexistent", None, None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_paths_are_not_found_with_a_session() {
    let app = TestApp::new();
    app.register("lost@example.com", "pw").await;
    let session = app.login("lost@example.com", "pw").await;

    let response = app
        .request("GET", "/api/nonexistent", None, Some(&session))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_requires_a_resolvable_session() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/profile", None, None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("GET", "/api/profile", None, Some("stale-token"))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
