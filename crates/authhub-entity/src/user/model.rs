//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user in the Authhub system.
///
/// The session and reset-token fields encode all per-user credential
/// state: `session_id` is non-null only while a login session is active,
/// and `reset_token` is non-null only between issuance and consumption.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier, assigned by the store.
    pub id: Uuid,
    /// Unique email address used as the login name.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub hashed_password: String,
    /// Opaque token of the currently active session, if any.
    #[serde(skip_serializing)]
    pub session_id: Option<String>,
    /// Outstanding single-use password-reset token, if any.
    #[serde(skip_serializing)]
    pub reset_token: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The user's public identity, safe to hand to the transport layer.
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// The public identity of a user: everything the transport layer may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address.
    pub email: String,
}

/// Data required to insert a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub hashed_password: String,
}

/// A partial update of a user record.
///
/// The outer `Option` means "leave unchanged"; for the nullable fields the
/// inner `Option` distinguishes "set to this value" from "clear to null".
/// A store must apply every present field in a single atomic update.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    /// Replace the password hash.
    pub hashed_password: Option<String>,
    /// Set or clear the active session token.
    pub session_id: Option<Option<String>>,
    /// Set or clear the outstanding reset token.
    pub reset_token: Option<Option<String>>,
}

impl UserPatch {
    /// True if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.hashed_password.is_none() && self.session_id.is_none() && self.reset_token.is_none()
    }
}
