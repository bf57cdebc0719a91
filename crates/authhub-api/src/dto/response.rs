//! Response DTOs.
//!
//! These shapes are a compatibility contract with existing clients, so
//! they are returned bare rather than wrapped in an envelope.

use serde::{Deserialize, Serialize};

/// Response carrying the acting email and an outcome message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessageResponse {
    /// Email address the operation acted on.
    pub email: String,
    /// Outcome message.
    pub message: String,
}

/// Bare outcome message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Outcome message.
    pub message: String,
}

/// The authenticated user's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// Email address.
    pub email: String,
}

/// A freshly issued password-reset token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetTokenResponse {
    /// Email address the token was issued for.
    pub email: String,
    /// The reset token.
    pub reset_token: String,
}

/// Service health status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Health indicator.
    pub status: String,
}
