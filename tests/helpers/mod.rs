//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use authhub_core::config::AppConfig;
use authhub_database::repositories::MemoryUserStore;
use authhub_database::store::UserStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: Arc<AppConfig>,
}

/// Decoded response from a test request
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// JSON body (Null when the body was empty)
    pub body: Value,
    /// Session cookie value from `Set-Cookie`, if any
    pub session_cookie: Option<String>,
}

impl TestApp {
    /// Create a new test application over an in-memory store
    pub fn new() -> Self {
        let config = Arc::new(AppConfig::default());
        let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        let state = authhub_api::app::build_state(Arc::clone(&config), store);
        let router = authhub_api::app::build_app(state);

        Self { router, config }
    }

    /// Issue a request, optionally with a JSON body and a session cookie
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        session_cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(value) = session_cookie {
            builder = builder.header(
                header::COOKIE,
                format!("{}={value}", self.config.auth.session_cookie),
            );
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        read_response(response).await
    }

    /// Issue a request carrying the session token as a bearer header
    pub async fn request_with_bearer(
        &self,
        method: &str,
        path: &str,
        token: &str,
    ) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        read_response(response).await
    }

    /// Register a user and return nothing; panics on failure
    pub async fn register(&self, email: &str, password: &str) {
        let response = self
            .request(
                "POST",
                "/api/users",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    /// Log in and return the session cookie value
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/sessions",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.session_cookie.expect("login sets a session cookie")
    }
}

async fn read_response(response: Response) -> TestResponse {
    let status = response.status();

    let session_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .and_then(|v| v.split_once('='))
        .map(|(_, value)| value.to_string());

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse {
        status,
        body,
        session_cookie,
    }
}
