//! Auth handlers — register, login, logout, profile, password reset.
//!
//! Response bodies and status codes are a compatibility contract with
//! existing clients; they must not change shape.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use validator::Validate;

use authhub_core::error::{AppError, ErrorKind};

use crate::dto::request::{
    LoginRequest, RegisterRequest, ResetTokenRequest, UpdatePasswordRequest,
};
use crate::dto::response::{
    EmailMessageResponse, MessageResponse, ProfileResponse, ResetTokenResponse,
};
use crate::error::ApiError;
use crate::extractors::SessionUser;
use crate::state::AppState;

/// POST /api/users
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<EmailMessageResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let identity = state.authority.register(&req.email, &req.password).await?;

    Ok(Json(EmailMessageResponse {
        email: identity.email,
        message: "user created".to_string(),
    }))
}

/// POST /api/sessions
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if !state
        .authority
        .authenticate(&req.email, &req.password)
        .await?
    {
        return Err(AppError::authentication("Invalid email or password").into());
    }

    // The user can only vanish between the check and the session write;
    // either way the caller sees the same rejection.
    let Some(session_id) = state.authority.create_session(&req.email).await? else {
        return Err(AppError::authentication("Invalid email or password").into());
    };

    let cookie = format!(
        "{}={session_id}; Path=/; HttpOnly",
        state.config.auth.session_cookie
    );
    let cookie = HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::internal(format!("Invalid session cookie: {e}")))?;

    let mut response = Json(EmailMessageResponse {
        email: req.email,
        message: "logged in".to_string(),
    })
    .into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);

    Ok(response)
}

/// GET /api/profile
pub async fn profile(session: SessionUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        email: session.email.clone(),
    })
}

/// DELETE /api/sessions
pub async fn logout(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.authority.destroy_session(session.id).await?;

    Ok(Json(MessageResponse {
        message: "Bienvenue".to_string(),
    }))
}

/// POST /api/reset_password
pub async fn request_reset_token(
    State(state): State<AppState>,
    Json(req): Json<ResetTokenRequest>,
) -> Result<Json<ResetTokenResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let reset_token = match state.authority.issue_reset_token(&req.email).await {
        Ok(token) => token,
        // The contract promises 400 for an unknown email on this route.
        Err(e) if e.kind == ErrorKind::NotFound => {
            return Err(AppError::validation("Email is not registered").into());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(ResetTokenResponse {
        email: req.email,
        reset_token,
    }))
}

/// PUT /api/reset_password
pub async fn update_password(
    State(state): State<AppState>,
    Json(req): Json<UpdatePasswordRequest>,
) -> Result<Json<EmailMessageResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .authority
        .consume_reset_token(&req.reset_token, &req.new_password)
        .await?;

    Ok(Json(EmailMessageResponse {
        email: req.email,
        message: "Password updated".to_string(),
    }))
}
