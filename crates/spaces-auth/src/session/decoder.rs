//! Session token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use spaces_core::config::SessionConfig;
use spaces_core::error::AppError;

use super::claims::SessionClaims;
use super::user::SessionUser;

/// Verifies session tokens taken from the session cookie.
#[derive(Clone)]
pub struct SessionDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for SessionDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl SessionDecoder {
    /// Creates a new decoder from session configuration.
    pub fn new(config: &SessionConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // clock skew
        validation.required_spec_claims.clear();
        validation.required_spec_claims.insert("exp".to_string());

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Decodes a session token into the caller's identity.
    ///
    /// Fails with an unauthorized error when the signature or expiry is
    /// invalid, or when the session carries no email.
    pub fn decode(&self, token: &str) -> Result<SessionUser, AppError> {
        let claims = self.decode_claims(token)?;

        let email = claims
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::unauthorized("Session has no email"))?;

        Ok(SessionUser {
            id: claims.sub,
            email,
            name: claims.name,
        })
    }

    /// Decodes and validates the raw claims.
    pub fn decode_claims(&self, token: &str) -> Result<SessionClaims, AppError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Session has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::unauthorized("Invalid session format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid session signature")
                }
                _ => AppError::unauthorized(format!("Session validation failed: {e}")),
            })?;

        Ok(token_data.claims)
    }
}
