//! Password hashing and verification.

pub mod hasher;

pub use hasher::{Argon2Hasher, CredentialHasher};
