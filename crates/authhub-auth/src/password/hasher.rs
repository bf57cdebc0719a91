//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use authhub_core::error::AppError;
use authhub_core::result::AppResult;

/// Capability interface for one-way credential hashing.
///
/// The authority is written against this trait so a deterministic fake can
/// stand in during tests.
pub trait CredentialHasher: Send + Sync + 'static {
    /// Hashes a plaintext password with a fresh salt.
    ///
    /// Two calls with the same password must produce different hashes.
    fn hash(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `false` for a wrong password and for a malformed hash; no
    /// error reaches the caller.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        // An unparseable hash means the password cannot match it.
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("b4l0u").unwrap();
        assert!(hasher.verify("b4l0u", &hash));
    }

    #[test]
    fn verify_fails_with_wrong_password() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("b4l0u").unwrap();
        assert!(!hasher.verify("t4rt1fl3tt3", &hash));
    }

    #[test]
    fn hash_is_salted_per_call() {
        let hasher = Argon2Hasher::new();
        let first = hasher.hash("b4l0u").unwrap();
        let second = hasher.hash("b4l0u").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("b4l0u", &first));
        assert!(hasher.verify("b4l0u", &second));
    }

    #[test]
    fn verify_is_false_for_malformed_hash() {
        let hasher = Argon2Hasher::new();
        assert!(!hasher.verify("b4l0u", "not-a-phc-string"));
        assert!(!hasher.verify("b4l0u", ""));
    }
}
