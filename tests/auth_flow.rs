//! Integration tests for the authentication endpoints.

mod helpers;

use axum::http::StatusCode;
use helpers::TestApp;
use serde_json::json;

const EMAIL: &str = "guillaume@holberton.io";
const PASSWD: &str = "b4l0u";
const NEW_PASSWD: &str = "t4rt1fl3tt3";

/// End-to-end walk through the whole account lifecycle: registration,
/// failed login, anonymous profile, login, profile, logout, password
/// reset, and login with the new password.
#[tokio::test]
async fn full_account_lifecycle() {
    let app = TestApp::new();

    // Register
    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "email": EMAIL, "password": PASSWD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "email": EMAIL, "message": "user created" })
    );

    // Log in with the wrong password
    let response = app
        .request(
            "POST",
            "/api/sessions",
            Some(json!({ "email": EMAIL, "password": NEW_PASSWD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // Profile without a session
    let response = app.request("GET", "/api/profile", None, Some("")).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // Log in
    let response = app
        .request(
            "POST",
            "/api/sessions",
            Some(json!({ "email": EMAIL, "password": PASSWD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "email": EMAIL, "message": "logged in" })
    );
    let session_id = response.session_cookie.expect("login sets a session cookie");

    // Profile with the session cookie
    let response = app
        .request("GET", "/api/profile", None, Some(&session_id))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "email": EMAIL }));

    // Log out
    let response = app
        .request("DELETE", "/api/sessions", None, Some(&session_id))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "message": "Bienvenue" }));

    // The old session no longer resolves
    let response = app
        .request("GET", "/api/profile", None, Some(&session_id))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // Request a reset token
    let response = app
        .request(
            "POST",
            "/api/reset_password",
            Some(json!({ "email": EMAIL })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.get("email").unwrap(), EMAIL);
    let reset_token = response
        .body
        .get("reset_token")
        .and_then(|v| v.as_str())
        .expect("reset token in response")
        .to_string();

    // Update the password
    let response = app
        .request(
            "PUT",
            "/api/reset_password",
            Some(json!({
                "email": EMAIL,
                "reset_token": reset_token,
                "new_password": NEW_PASSWD,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "email": EMAIL, "message": "Password updated" })
    );

    // Log in with the new password
    let response = app
        .request(
            "POST",
            "/api/sessions",
            Some(json!({ "email": EMAIL, "password": NEW_PASSWD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The old password no longer works
    let response = app
        .request(
            "POST",
            "/api/sessions",
            Some(json!({ "email": EMAIL, "password": PASSWD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_duplicate_email() {
    let app = TestApp::new();
    app.register("dup@example.com", "pw").await;

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "email": "dup@example.com", "password": "pw" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_unknown_email() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/sessions",
            Some(json!({ "email": "nobody@example.com", "password": "pw" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_without_session() {
    let app = TestApp::new();

    let response = app.request("DELETE", "/api/sessions", None, None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn reset_token_for_unknown_email() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/reset_password",
            Some(json!({ "email": "nobody@example.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reset_token_is_single_use() {
    let app = TestApp::new();
    app.register("once@example.com", "pw").await;

    let response = app
        .request(
            "POST",
            "/api/reset_password",
            Some(json!({ "email": "once@example.com" })),
            None,
        )
        .await;
    let reset_token = response
        .body
        .get("reset_token")
        .and_then(|v| v.as_str())
        .unwrap()
        .to_string();

    let body = json!({
        "email": "once@example.com",
        "reset_token": reset_token,
        "new_password": "pw2",
    });

    let response = app
        .request("PUT", "/api/reset_password", Some(body.clone()), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("PUT", "/api/reset_password", Some(body), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_password_with_unknown_token() {
    let app = TestApp::new();

    let response = app
        .request(
            "PUT",
            "/api/reset_password",
            Some(json!({
                "email": "nobody@example.com",
                "reset_token": "never-issued",
                "new_password": "pw",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_invalidates_previous_session() {
    let app = TestApp::new();
    app.register("two@example.com", "pw").await;

    let first = app.login("two@example.com", "pw").await;
    let second = app.login("two@example.com", "pw").await;
    assert_ne!(first, second);

    let response = app.request("GET", "/api/profile", None, Some(&first)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("GET", "/api/profile", None, Some(&second)).await;
    assert_eq!(response.status, StatusCode::OK);
}
