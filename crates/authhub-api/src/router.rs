//! Route definitions for the Authhub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and the path authorization guard.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new().merge(auth_routes()).merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_session,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, logout, profile, password reset
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(handlers::auth::register))
        .route("/sessions", post(handlers::auth::login))
        .route("/sessions", delete(handlers::auth::logout))
        .route("/profile", get(handlers::auth::profile))
        .route("/reset_password", post(handlers::auth::request_reset_token))
        .route("/reset_password", put(handlers::auth::update_password))
}

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new().route("/status", get(handlers::health::status))
}
