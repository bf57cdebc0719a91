//! The user store contract.

use async_trait::async_trait;
use uuid::Uuid;

use authhub_core::result::AppResult;
use authhub_entity::user::{CreateUser, User, UserPatch};

/// Persistence contract for user records.
///
/// The authority layer is written against this trait so that any backing
/// store (embedded SQLite, in-memory, a test fake) can be substituted.
///
/// Implementations must guarantee:
/// - `insert` enforces email uniqueness atomically and fails with a
///   `Conflict` error on a duplicate, so concurrent inserts of the same
///   email resolve to exactly one success;
/// - `update` applies every field present in the patch in one atomic
///   write, and fails with `NotFound` when no record has the given id;
/// - a uniqueness violation on `session_id` or `reset_token` surfaces as
///   `Conflict` and is never retried internally.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email address.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find the user owning the given active session token.
    async fn find_by_session_id(&self, session_id: &str) -> AppResult<Option<User>>;

    /// Find the user owning the given outstanding reset token.
    async fn find_by_reset_token(&self, reset_token: &str) -> AppResult<Option<User>>;

    /// Insert a new user and return the stored record.
    async fn insert(&self, data: CreateUser) -> AppResult<User>;

    /// Apply a partial update atomically and return the updated record.
    async fn update(&self, id: Uuid, patch: UserPatch) -> AppResult<User>;
}
