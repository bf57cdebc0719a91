//! In-memory user store using a Tokio mutex for single-process use.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_entity::user::{CreateUser, User, UserPatch};

use crate::store::UserStore;

/// In-memory user store guarding its map with a Tokio mutex.
///
/// The mutex makes every operation atomic with respect to the others,
/// which is what gives `insert` its one-winner guarantee under
/// concurrent duplicate registration. Suitable for tests and
/// single-process deployments only.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    /// Protected user records, keyed by id.
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl MemoryUserStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_session_id(&self, session_id: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users
            .values()
            .find(|u| u.session_id.as_deref() == Some(session_id))
            .cloned())
    }

    async fn find_by_reset_token(&self, reset_token: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users
            .values()
            .find(|u| u.reset_token.as_deref() == Some(reset_token))
            .cloned())
    }

    async fn insert(&self, data: CreateUser) -> AppResult<User> {
        let mut users = self.users.lock().await;

        if users.values().any(|u| u.email == data.email) {
            return Err(AppError::conflict(format!(
                "Email '{}' already in use",
                data.email
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: data.email,
            hashed_password: data.hashed_password,
            session_id: None,
            reset_token: None,
            created_at: now,
            updated_at: now,
        };

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> AppResult<User> {
        let mut users = self.users.lock().await;

        if !users.contains_key(&id) {
            return Err(AppError::not_found(format!("User {id} not found")));
        }

        // Uniqueness checks mirror the SQLite constraints.
        if let Some(Some(session_id)) = &patch.session_id {
            if users
                .values()
                .any(|u| u.id != id && u.session_id.as_deref() == Some(session_id))
            {
                return Err(AppError::conflict("Token value already in use"));
            }
        }
        if let Some(Some(reset_token)) = &patch.reset_token {
            if users
                .values()
                .any(|u| u.id != id && u.reset_token.as_deref() == Some(reset_token))
            {
                return Err(AppError::conflict("Token value already in use"));
            }
        }

        let Some(user) = users.get_mut(&id) else {
            return Err(AppError::not_found(format!("User {id} not found")));
        };
        if let Some(hashed_password) = patch.hashed_password {
            user.hashed_password = hashed_password;
        }
        if let Some(session_id) = patch.session_id {
            user.session_id = session_id;
        }
        if let Some(reset_token) = patch.reset_token {
            user.reset_token = reset_token;
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }
}
