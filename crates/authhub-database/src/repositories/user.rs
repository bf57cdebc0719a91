//! SQLite user store implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_entity::user::{CreateUser, User, UserPatch};

use crate::store::UserStore;

/// User store backed by the embedded SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Create a new store over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT * FROM users WHERE {column} = $1"))
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to find user by {column}"),
                    e,
                )
            })
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.find_one("email", email).await
    }

    async fn find_by_session_id(&self, session_id: &str) -> AppResult<Option<User>> {
        self.find_one("session_id", session_id).await
    }

    async fn find_by_reset_token(&self, reset_token: &str) -> AppResult<Option<User>> {
        self.find_one("reset_token", reset_token).await
    }

    async fn insert(&self, data: CreateUser) -> AppResult<User> {
        let now = Utc::now();

        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, hashed_password, session_id, reset_token, created_at, updated_at) \
             VALUES ($1, $2, $3, NULL, NULL, $4, $5) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.email)
        .bind(&data.hashed_password)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::conflict(format!("Email '{}' already in use", data.email))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to insert user", e),
        })
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> AppResult<User> {
        let set_hashed_password = patch.hashed_password.is_some();
        let set_session_id = patch.session_id.is_some();
        let set_reset_token = patch.reset_token.is_some();

        // One statement so the whole patch lands atomically. The boolean
        // flags select which fields the patch actually carries.
        sqlx::query_as::<_, User>(
            "UPDATE users SET \
                 hashed_password = CASE WHEN $2 THEN $3 ELSE hashed_password END, \
                 session_id      = CASE WHEN $4 THEN $5 ELSE session_id END, \
                 reset_token     = CASE WHEN $6 THEN $7 ELSE reset_token END, \
                 updated_at      = $8 \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(set_hashed_password)
        .bind(patch.hashed_password)
        .bind(set_session_id)
        .bind(patch.session_id.flatten())
        .bind(set_reset_token)
        .bind(patch.reset_token.flatten())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::conflict("Token value already in use")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update user", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }
}
