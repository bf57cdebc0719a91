//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use authhub_auth::session::SessionAuthority;
use authhub_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Session authority.
    pub authority: Arc<SessionAuthority>,
}

impl AppState {
    /// Creates the shared state.
    pub fn new(config: Arc<AppConfig>, authority: Arc<SessionAuthority>) -> Self {
        Self { config, authority }
    }
}
