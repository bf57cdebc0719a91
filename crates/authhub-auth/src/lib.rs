//! # authhub-auth
//!
//! Credential hashing, opaque token generation, the session authority, and
//! path-based authorization for Authhub.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and verification
//! - `token` — opaque high-entropy token generation
//! - `session` — registration, login, session and reset-token lifecycle
//! - `access` — request-path authorization with wildcard exclusions

pub mod access;
pub mod password;
pub mod session;
pub mod token;

pub use access::requires_auth;
pub use password::{Argon2Hasher, CredentialHasher};
pub use session::SessionAuthority;
pub use token::{TokenGenerator, UuidTokenGenerator};
