//! Backend service configuration.

use serde::{Deserialize, Serialize};

/// How the caller's identity is presented to the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialFormat {
    /// Base64-encoded JSON `{email, name, id}`. Not integrity protected.
    #[default]
    Plain,
    /// HS256 JWT carrying the same claims, signed with `credential_secret`.
    Signed,
}

/// Where the backend lives and how to talk to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend origin, e.g. `http://localhost:8080`.
    #[serde(default = "default_url")]
    pub url: String,
    /// Credential format sent as the bearer token.
    #[serde(default)]
    pub credential: CredentialFormat,
    /// Shared secret for [`CredentialFormat::Signed`].
    #[serde(default)]
    pub credential_secret: String,
    /// Lifetime of a signed credential in seconds.
    #[serde(default = "default_credential_ttl")]
    pub credential_ttl_seconds: u64,
    /// TCP connect timeout in seconds (0 = transport default).
    #[serde(default)]
    pub connect_timeout_seconds: u64,
    /// Whole-request timeout in seconds (0 = transport default).
    #[serde(default)]
    pub request_timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            credential: CredentialFormat::default(),
            credential_secret: String::new(),
            credential_ttl_seconds: default_credential_ttl(),
            connect_timeout_seconds: 0,
            request_timeout_seconds: 0,
        }
    }
}

impl BackendConfig {
    /// Origin without a trailing slash.
    pub fn origin(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

fn default_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_credential_ttl() -> u64 {
    60
}
