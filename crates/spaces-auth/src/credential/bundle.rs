//! The identity assertion forwarded to the backend.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use spaces_core::error::AppError;

use crate::session::SessionUser;

/// `{email, name, id}` as the backend expects it.
///
/// `name` and `id` are omitted, not `null`, when unknown; the backend falls
/// back to the email for both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialBundle {
    /// Caller email.
    pub email: String,
    /// Caller display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Caller identity provider ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl From<&SessionUser> for CredentialBundle {
    fn from(user: &SessionUser) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone(),
            id: user.id.clone(),
        }
    }
}

impl CredentialBundle {
    /// Base64 (standard alphabet, padded) of the JSON encoding.
    pub fn encode_plain(&self) -> Result<String, AppError> {
        let json = serde_json::to_vec(self)?;
        Ok(STANDARD.encode(json))
    }

    /// Inverse of [`CredentialBundle::encode_plain`].
    pub fn decode_plain(token: &str) -> Result<Self, AppError> {
        let raw = STANDARD
            .decode(token.trim())
            .map_err(|e| AppError::unauthorized(format!("Invalid credential encoding: {e}")))?;
        serde_json::from_slice(&raw)
            .map_err(|e| AppError::unauthorized(format!("Invalid credential payload: {e}")))
    }
}
