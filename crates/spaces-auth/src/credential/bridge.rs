//! Produces the per-request backend credential from the session.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;

use spaces_core::config::{BackendConfig, CredentialFormat};
use spaces_core::error::AppError;

use super::bundle::CredentialBundle;
use crate::session::SessionUser;

/// A bearer credential ready for the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// The raw token.
    pub fn token(&self) -> &str {
        &self.0
    }

    /// `Bearer <token>`.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(..)")
    }
}

/// Signed form of the bundle.
#[derive(Debug, Serialize)]
struct SignedClaims<'a> {
    #[serde(flatten)]
    bundle: &'a CredentialBundle,
    iat: i64,
    exp: i64,
}

/// Turns the caller's session into a backend credential.
///
/// In [`CredentialFormat::Plain`] mode the credential is only an assertion:
/// anyone who can reach the backend can forge it. [`CredentialFormat::Signed`]
/// wraps the same bundle in a short-lived HS256 JWT.
#[derive(Clone)]
pub struct CredentialBridge {
    format: CredentialFormat,
    signing_key: Option<EncodingKey>,
    ttl_seconds: i64,
}

impl std::fmt::Debug for CredentialBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialBridge")
            .field("format", &self.format)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl CredentialBridge {
    /// Creates a bridge from backend configuration.
    pub fn new(config: &BackendConfig) -> Self {
        let signing_key = match config.credential {
            CredentialFormat::Plain => None,
            CredentialFormat::Signed => Some(EncodingKey::from_secret(
                config.credential_secret.as_bytes(),
            )),
        };

        Self {
            format: config.credential,
            signing_key,
            ttl_seconds: config.credential_ttl_seconds.max(1) as i64,
        }
    }

    /// The configured credential format.
    pub fn format(&self) -> CredentialFormat {
        self.format
    }

    /// Produces the credential for the caller.
    ///
    /// Fails with an unauthorized error when there is no session or the
    /// session has no email.
    pub fn credential(&self, user: Option<&SessionUser>) -> Result<Credential, AppError> {
        let user = user.ok_or_else(|| AppError::unauthorized("Unauthorized"))?;
        if user.email.trim().is_empty() {
            return Err(AppError::unauthorized("Unauthorized"));
        }

        let bundle = CredentialBundle::from(user);
        let token = match (&self.format, &self.signing_key) {
            (CredentialFormat::Signed, Some(key)) => {
                let now = Utc::now().timestamp();
                let claims = SignedClaims {
                    bundle: &bundle,
                    iat: now,
                    exp: now + self.ttl_seconds,
                };
                encode(&Header::default(), &claims, key).map_err(|e| {
                    AppError::internal(format!("Failed to sign backend credential: {e}"))
                })?
            }
            _ => bundle.encode_plain()?,
        };

        tracing::trace!(email = %user.email, format = ?self.format, "Derived backend credential");
        Ok(Credential(token))
    }
}
