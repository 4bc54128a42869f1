//! Activity log handler.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use super::json_reply;
use crate::error::ApiResult;
use crate::extractors::SessionAuth;
use crate::state::AppState;

/// GET /api/spaces/{id}/activity
pub async fn list_activity(
    State(state): State<AppState>,
    auth: SessionAuth,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let reply = state
        .backend
        .list_activity(&auth.credential, &id)
        .await
        .map_err(|e| e.context("Failed to fetch activity"))?;

    Ok(json_reply(StatusCode::OK, reply))
}
