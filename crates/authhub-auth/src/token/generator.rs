//! Opaque token generation.

use uuid::Uuid;

/// Capability interface for producing opaque, high-entropy tokens.
///
/// The same generator serves session ids and reset tokens; callers keep
/// the namespaces apart by the record field they store the token in. The
/// authority is written against this trait so tests can substitute a
/// deterministic sequence.
pub trait TokenGenerator: Send + Sync + 'static {
    /// Returns a fresh token with negligible collision probability.
    fn generate(&self) -> String;
}

/// Token generator producing hyphenated v4 UUIDs (122 bits of entropy).
#[derive(Debug, Clone, Default)]
pub struct UuidTokenGenerator;

impl UuidTokenGenerator {
    /// Creates a new token generator.
    pub fn new() -> Self {
        Self
    }
}

impl TokenGenerator for UuidTokenGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique() {
        let generator = UuidTokenGenerator::new();
        let first = generator.generate();
        let second = generator.generate();
        assert_ne!(first, second);
    }

    #[test]
    fn tokens_are_v4_uuids() {
        let generator = UuidTokenGenerator::new();
        let token = Uuid::parse_str(&generator.generate()).unwrap();
        assert_eq!(token.get_version_num(), 4);
    }
}
