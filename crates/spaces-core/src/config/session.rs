//! Session cookie configuration.

use serde::{Deserialize, Serialize};

/// Session cookie verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// HMAC secret the session token is signed with.
    #[serde(default = "default_secret")]
    pub secret: String,
    /// Lifetime of issued sessions in hours.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
    /// Mark the session cookie `Secure` when the gateway sets or clears it.
    #[serde(default)]
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            secret: default_secret(),
            ttl_hours: default_ttl_hours(),
            secure_cookie: false,
        }
    }
}

fn default_cookie_name() -> String {
    "spaces.session-token".to_string()
}

fn default_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_ttl_hours() -> u64 {
    24 * 30
}
