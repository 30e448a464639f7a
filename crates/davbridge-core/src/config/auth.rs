//! Bearer token configuration.

use serde::{Deserialize, Serialize};

/// Pre-shared token settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Exact value the `Authorization` header must carry.
    #[serde(default)]
    pub token: String,
    /// Include the expected token in 401 response bodies.
    ///
    /// Existing clients rely on this diagnostic, but it discloses the secret
    /// to anyone who can reach the server. Disable it once no client needs it.
    #[serde(default = "default_echo_expected_token")]
    pub echo_expected_token: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            echo_expected_token: default_echo_expected_token(),
        }
    }
}

fn default_echo_expected_token() -> bool {
    true
}
