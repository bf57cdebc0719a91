//! Session authority — registration, login, session and reset-token flows.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_database::store::UserStore;
use authhub_entity::user::{CreateUser, UserIdentity, UserPatch};

use crate::password::CredentialHasher;
use crate::token::TokenGenerator;

/// Orchestrates every credential state transition on a user record.
///
/// The authority holds no state of its own; each operation reads a record
/// through the store, applies one atomic update, and returns. Sessions and
/// reset tokens are opaque values living entirely on the record: a user
/// has at most one active session, and issuing a new session or reset
/// token silently invalidates the previous one.
#[derive(Clone)]
pub struct SessionAuthority {
    /// User record persistence.
    store: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<dyn CredentialHasher>,
    /// Opaque token source for session ids and reset tokens.
    tokens: Arc<dyn TokenGenerator>,
}

impl std::fmt::Debug for SessionAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAuthority").finish_non_exhaustive()
    }
}

impl SessionAuthority {
    /// Creates a new authority over the given store and capabilities.
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenGenerator>,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Registers a new user.
    ///
    /// Fails with `AlreadyExists` when the email is taken, including when
    /// a concurrent registration wins the insert race.
    pub async fn register(&self, email: &str, password: &str) -> AppResult<UserIdentity> {
        if self.store.find_by_email(email).await?.is_some() {
            return Err(AppError::already_exists(format!(
                "User {email} already exists"
            )));
        }

        let hashed_password = self.hasher.hash(password)?;
        let created = self
            .store
            .insert(CreateUser {
                email: email.to_string(),
                hashed_password,
            })
            .await;

        match created {
            Ok(user) => {
                info!(user_id = %user.id, "User registered");
                Ok(user.identity())
            }
            // A concurrent insert of the same email lost the race at the
            // store; surface the same outcome as the pre-check.
            Err(e) if e.kind == ErrorKind::Conflict => Err(AppError::already_exists(format!(
                "User {email} already exists"
            ))),
            Err(e) => Err(e),
        }
    }

    /// Checks a login credential.
    ///
    /// Returns `false` for an unknown email or a wrong password; store
    /// failures still propagate as errors.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<bool> {
        match self.store.find_by_email(email).await? {
            Some(user) => Ok(self.hasher.verify(password, &user.hashed_password)),
            None => Ok(false),
        }
    }

    /// Opens a session for the user with the given email.
    ///
    /// Returns `None` when no such user exists. Any previously active
    /// session is overwritten and thereby invalidated.
    pub async fn create_session(&self, email: &str) -> AppResult<Option<String>> {
        let Some(user) = self.store.find_by_email(email).await? else {
            return Ok(None);
        };

        let session_id = self.tokens.generate();
        self.store
            .update(
                user.id,
                UserPatch {
                    session_id: Some(Some(session_id.clone())),
                    ..Default::default()
                },
            )
            .await?;

        info!(user_id = %user.id, "Session created");
        Ok(Some(session_id))
    }

    /// Resolves a session token to the owning user's identity.
    pub async fn resolve_session(&self, session_id: &str) -> AppResult<Option<UserIdentity>> {
        Ok(self
            .store
            .find_by_session_id(session_id)
            .await?
            .map(|user| user.identity()))
    }

    /// Closes the user's session.
    ///
    /// Destroying the session of a nonexistent user is a no-op, not an
    /// error; the operation is idempotent.
    pub async fn destroy_session(&self, user_id: Uuid) -> AppResult<()> {
        if self.store.find_by_id(user_id).await?.is_none() {
            return Ok(());
        }

        let cleared = self
            .store
            .update(
                user_id,
                UserPatch {
                    session_id: Some(None),
                    ..Default::default()
                },
            )
            .await;

        match cleared {
            Ok(_) => {
                info!(user_id = %user_id, "Session destroyed");
                Ok(())
            }
            // The record vanished between lookup and update; same no-op.
            Err(e) if e.kind == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Issues a password-reset token for the user with the given email.
    ///
    /// Fails with `NotFound` for an unknown email. Any prior unconsumed
    /// token is overwritten and thereby invalidated.
    pub async fn issue_reset_token(&self, email: &str) -> AppResult<String> {
        let Some(user) = self.store.find_by_email(email).await? else {
            return Err(AppError::not_found(format!("User {email} not found")));
        };

        let reset_token = self.tokens.generate();
        self.store
            .update(
                user.id,
                UserPatch {
                    reset_token: Some(Some(reset_token.clone())),
                    ..Default::default()
                },
            )
            .await?;

        info!(user_id = %user.id, "Reset token issued");
        Ok(reset_token)
    }

    /// Consumes a reset token, installing the new password.
    ///
    /// Fails with `InvalidToken` when the token is unknown or already
    /// consumed. The rehash and the token clear land in one atomic update,
    /// so the token can never be replayed against a half-applied record.
    pub async fn consume_reset_token(&self, reset_token: &str, new_password: &str) -> AppResult<()> {
        let Some(user) = self.store.find_by_reset_token(reset_token).await? else {
            return Err(AppError::invalid_token("Reset token is not valid"));
        };

        let hashed_password = self.hasher.hash(new_password)?;
        let updated = self
            .store
            .update(
                user.id,
                UserPatch {
                    hashed_password: Some(hashed_password),
                    reset_token: Some(None),
                    ..Default::default()
                },
            )
            .await;

        match updated {
            Ok(_) => {
                info!(user_id = %user.id, "Password updated via reset token");
                Ok(())
            }
            Err(e) if e.kind == ErrorKind::NotFound => {
                Err(AppError::invalid_token("Reset token is not valid"))
            }
            Err(e) => Err(e),
        }
    }
}
