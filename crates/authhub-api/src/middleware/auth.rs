//! Path authorization guard (tower layer).
//!
//! Applies the path filter to every request before routing: paths on the
//! configured exclusion list pass through untouched, everything else must
//! carry a resolvable session credential.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use authhub_auth::access::requires_auth;
use authhub_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::auth::session_token;
use crate::state::AppState;

/// Middleware that rejects requests to protected paths without a valid
/// session.
///
/// Handlers needing the caller's identity still go through the
/// `SessionUser` extractor; this guard only decides whether a credential
/// must be present at all.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = request.uri().path();

    if !requires_auth(Some(path), &state.config.auth.public_paths) {
        return Ok(next.run(request).await);
    }

    let token = session_token(request.headers(), &state.config.auth.session_cookie)
        .ok_or_else(|| AppError::authorization("Valid session required"))?;

    if state.authority.resolve_session(&token).await?.is_none() {
        return Err(AppError::authorization("Valid session required").into());
    }

    Ok(next.run(request).await)
}
