//! JSON body extractor that reports failures in the gateway's error shape.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};

use spaces_core::error::AppError;

use crate::error::ApiError;

/// A request body that must be a JSON object. Forwarded to the backend
/// as-is, unknown fields included.
#[derive(Debug, Clone)]
pub struct JsonObject(pub serde_json::Value);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(format!("Failed to read request body: {e}")))?;

        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::validation(format!("Invalid JSON body: {e}")))?;

        if !value.is_object() {
            return Err(AppError::validation("Request body must be a JSON object").into());
        }

        Ok(JsonObject(value))
    }
}
