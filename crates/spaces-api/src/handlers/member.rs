//! Membership handlers.
//!
//! The member email arrives percent-decoded from the route and is encoded
//! again as a single path segment on the way to the backend.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use super::json_reply;
use crate::error::ApiResult;
use crate::extractors::{JsonObject, SessionAuth};
use crate::state::AppState;

/// POST /api/spaces/{id}/members
pub async fn add_member(
    State(state): State<AppState>,
    auth: SessionAuth,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> ApiResult<Response> {
    let reply = state
        .backend
        .add_member(&auth.credential, &id, body)
        .await
        .map_err(|e| e.context("Failed to add member"))?;

    Ok(json_reply(StatusCode::OK, reply))
}

/// PUT /api/spaces/{id}/members/{email}
pub async fn change_role(
    State(state): State<AppState>,
    auth: SessionAuth,
    Path((id, email)): Path<(String, String)>,
    JsonObject(body): JsonObject,
) -> ApiResult<Response> {
    let reply = state
        .backend
        .change_member_role(&auth.credential, &id, &email, body)
        .await
        .map_err(|e| e.context("Failed to change role"))?;

    Ok(json_reply(StatusCode::OK, reply))
}

/// DELETE /api/spaces/{id}/members/{email}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: SessionAuth,
    Path((id, email)): Path<(String, String)>,
) -> ApiResult<Response> {
    let reply = state
        .backend
        .remove_member(&auth.credential, &id, &email)
        .await
        .map_err(|e| e.context("Failed to remove member"))?;

    Ok(json_reply(StatusCode::OK, reply))
}
