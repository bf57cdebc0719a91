//! Application builder — wires router + middleware + state into an Axum app.

use std::sync::Arc;

use axum::{Router, middleware as axum_middleware};
use tower_http::trace::TraceLayer;
use tracing::info;

use authhub_auth::password::Argon2Hasher;
use authhub_auth::session::SessionAuthority;
use authhub_auth::token::UuidTokenGenerator;
use authhub_core::config::AppConfig;
use authhub_core::error::{AppError, ErrorKind};
use authhub_database::connection::DatabasePool;
use authhub_database::repositories::SqliteUserStore;
use authhub_database::store::UserStore;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
}

/// Builds the shared application state over the given store.
pub fn build_state(config: Arc<AppConfig>, store: Arc<dyn UserStore>) -> AppState {
    let authority = Arc::new(SessionAuthority::new(
        store,
        Arc::new(Argon2Hasher::new()),
        Arc::new(UuidTokenGenerator::new()),
    ));

    AppState::new(config, authority)
}

/// Runs the Authhub server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    ensure_database_directory(&config.database.url).await?;

    let db = DatabasePool::connect(&config.database).await?;
    db.init_schema().await?;

    let store: Arc<dyn UserStore> = Arc::new(SqliteUserStore::new(db.into_pool()));
    let state = build_state(Arc::new(config.clone()), store);
    let app = build_app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;

    info!(%addr, "Authhub listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))
}

/// Ensures the parent directory of a file-backed SQLite database exists.
async fn ensure_database_directory(url: &str) -> Result<(), AppError> {
    let path = url.strip_prefix("sqlite://").unwrap_or(url);
    let path = path.split('?').next().unwrap_or(path);

    if path.is_empty() || path.starts_with(':') {
        return Ok(());
    }

    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Internal,
                    format!("Failed to create {}", parent.display()),
                    e,
                )
            })?;
        }
    }

    Ok(())
}

/// Resolves when the process receives a shutdown signal.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
