//! HTTP handlers, one module per resource.

pub mod activity;
pub mod auth;
pub mod file;
pub mod health;
pub mod member;
pub mod space;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use spaces_backend::JsonReply;

/// Answers with the backend's decoded JSON under the gateway's own status.
pub(crate) fn json_reply(status: StatusCode, reply: JsonReply) -> Response {
    (status, Json(reply.body)).into_response()
}
