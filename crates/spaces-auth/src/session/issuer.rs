//! Session token creation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use spaces_core::config::SessionConfig;
use spaces_core::error::AppError;

use super::claims::SessionClaims;
use super::user::SessionUser;

/// A freshly minted session token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedSession {
    /// Value to place in the session cookie.
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

/// Creates signed session tokens.
///
/// Sign-in itself belongs to the identity provider; this is used to mint
/// development sessions and in tests.
#[derive(Clone)]
pub struct SessionIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Session TTL in hours.
    ttl_hours: i64,
}

impl std::fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIssuer")
            .field("ttl_hours", &self.ttl_hours)
            .finish()
    }
}

impl SessionIssuer {
    /// Creates a new issuer from session configuration.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            ttl_hours: config.ttl_hours as i64,
        }
    }

    /// Issues a session token for the given user.
    pub fn issue(&self, user: &SessionUser) -> Result<IssuedSession, AppError> {
        if user.email.trim().is_empty() {
            return Err(AppError::validation("Session email must not be empty"));
        }

        let now = Utc::now();
        let expires_at = now + chrono::Duration::hours(self.ttl_hours);

        let claims = SessionClaims {
            sub: user.id.clone(),
            email: Some(user.email.clone()),
            name: user.name.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;

        Ok(IssuedSession { token, expires_at })
    }
}
