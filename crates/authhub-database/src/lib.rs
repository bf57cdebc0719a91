//! # authhub-database
//!
//! The user store contract, SQLite connection management, and the concrete
//! store implementations for Authhub.

pub mod connection;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use repositories::{MemoryUserStore, SqliteUserStore};
pub use store::UserStore;
