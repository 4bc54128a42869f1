//! Space CRUD handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use super::json_reply;
use crate::error::ApiResult;
use crate::extractors::{JsonObject, SessionAuth};
use crate::state::AppState;

/// GET /api/spaces
pub async fn list_spaces(
    State(state): State<AppState>,
    auth: SessionAuth,
) -> ApiResult<Response> {
    let reply = state
        .backend
        .list_spaces(&auth.credential)
        .await
        .map_err(|e| e.context("Failed to fetch spaces"))?;

    Ok(json_reply(StatusCode::OK, reply))
}

/// POST /api/spaces
pub async fn create_space(
    State(state): State<AppState>,
    auth: SessionAuth,
    JsonObject(body): JsonObject,
) -> ApiResult<Response> {
    let reply = state
        .backend
        .create_space(&auth.credential, body)
        .await
        .map_err(|e| e.context("Failed to create space"))?;

    tracing::info!(email = %auth.email, "Space created");
    Ok(json_reply(StatusCode::CREATED, reply))
}

/// GET /api/spaces/{id}
pub async fn get_space(
    State(state): State<AppState>,
    auth: SessionAuth,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let reply = state
        .backend
        .get_space(&auth.credential, &id)
        .await
        .map_err(|e| e.context("Failed to fetch space"))?;

    Ok(json_reply(StatusCode::OK, reply))
}

/// PUT /api/spaces/{id}
pub async fn update_space(
    State(state): State<AppState>,
    auth: SessionAuth,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> ApiResult<Response> {
    let reply = state
        .backend
        .update_space(&auth.credential, &id, body)
        .await
        .map_err(|e| e.context("Failed to update space"))?;

    Ok(json_reply(StatusCode::OK, reply))
}

/// DELETE /api/spaces/{id}
pub async fn delete_space(
    State(state): State<AppState>,
    auth: SessionAuth,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let reply = state
        .backend
        .delete_space(&auth.credential, &id)
        .await
        .map_err(|e| e.context("Failed to delete space"))?;

    tracing::info!(email = %auth.email, space_id = %id, "Space deleted");
    Ok(json_reply(StatusCode::OK, reply))
}
