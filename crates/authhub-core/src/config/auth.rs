//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Name of the session cookie.
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
    /// Paths exempted from the authentication requirement.
    ///
    /// An entry ending in `*` matches any path starting with the prefix
    /// before the `*`; any other entry matches the path exactly, ignoring
    /// a trailing slash. First match wins.
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie: default_session_cookie(),
            public_paths: default_public_paths(),
        }
    }
}

fn default_session_cookie() -> String {
    "session_id".to_string()
}

fn default_public_paths() -> Vec<String> {
    vec![
        "/api/status/".to_string(),
        "/api/users/".to_string(),
        "/api/sessions/".to_string(),
        // Wildcard prefixes match the path as received, without the
        // trailing-slash normalization exact entries get.
        "/api/reset_password*".to_string(),
    ]
}
