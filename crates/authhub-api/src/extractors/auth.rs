//! `SessionUser` extractor — resolves the session credential to a user identity.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use authhub_core::error::AppError;
use authhub_entity::user::UserIdentity;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user identity available in handlers.
///
/// The credential is taken from the session cookie or, failing that, from
/// a bearer `Authorization` header carrying the same opaque session token.
/// Requests without a resolvable session are rejected with 403.
#[derive(Debug, Clone)]
pub struct SessionUser(pub UserIdentity);

impl SessionUser {
    /// Returns the inner identity.
    pub fn identity(&self) -> &UserIdentity {
        &self.0
    }
}

impl std::ops::Deref for SessionUser {
    type Target = UserIdentity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers, &state.config.auth.session_cookie)
            .ok_or_else(|| AppError::authorization("Valid session required"))?;

        let identity = state
            .authority
            .resolve_session(&token)
            .await?
            .ok_or_else(|| AppError::authorization("Valid session required"))?;

        Ok(SessionUser(identity))
    }
}

/// Pulls the session token out of the request headers.
///
/// The cookie channel wins over the bearer header when both are present.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(token) = cookie_value(headers, cookie_name) {
        return Some(token);
    }

    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .map(String::from)
}

/// Reads a named cookie from the `Cookie` header.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get("cookie").and_then(|v| v.to_str().ok())?;

    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}
