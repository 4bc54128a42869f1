//! File listing, upload, download and delete handlers.

use axum::body::Body;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;

use spaces_backend::{BinaryReply, FormField};
use spaces_core::error::AppError;

use super::json_reply;
use crate::error::ApiResult;
use crate::extractors::SessionAuth;
use crate::state::AppState;

/// Form field that must carry the upload.
const FILE_FIELD: &str = "file";

/// GET /api/spaces/{id}/files
pub async fn list_files(
    State(state): State<AppState>,
    auth: SessionAuth,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let reply = state
        .backend
        .list_files(&auth.credential, &id)
        .await
        .map_err(|e| e.context("Failed to fetch files"))?;

    Ok(json_reply(StatusCode::OK, reply))
}

/// POST /api/spaces/{id}/files (multipart/form-data)
///
/// Every field is forwarded; the form is rebuilt with a fresh boundary.
pub async fn upload_file(
    State(state): State<AppState>,
    auth: SessionAuth,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Response> {
    let multipart = multipart
        .map_err(|e| AppError::validation(format!("Expected a multipart form: {e}")))?;
    let fields = read_fields(multipart).await?;

    if !fields
        .iter()
        .any(|f| f.name() == FILE_FIELD && matches!(f, FormField::File { .. }))
    {
        return Err(AppError::validation("Missing 'file' field").into());
    }

    let reply = state
        .backend
        .upload_file(&auth.credential, &id, fields)
        .await
        .map_err(|e| e.context("Failed to upload file"))?;

    tracing::info!(email = %auth.email, space_id = %id, "File uploaded");
    Ok(json_reply(StatusCode::CREATED, reply))
}

/// GET /api/files/{fileId}
pub async fn download_file(
    State(state): State<AppState>,
    auth: SessionAuth,
    Path(file_id): Path<String>,
) -> ApiResult<Response> {
    let reply = state
        .backend
        .download_file(&auth.credential, &file_id)
        .await
        .map_err(|e| e.context("Failed to download file"))?;

    let content_type = reply
        .content_type
        .clone()
        .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));
    let disposition = reply
        .content_disposition
        .clone()
        .unwrap_or_else(|| HeaderValue::from_static(""));

    relay_binary(reply, content_type, Some(disposition))
}

/// DELETE /api/files/{fileId}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: SessionAuth,
    Path(file_id): Path<String>,
) -> ApiResult<Response> {
    let reply = state
        .backend
        .delete_file(&auth.credential, &file_id)
        .await
        .map_err(|e| e.context("Failed to delete file"))?;

    tracing::info!(email = %auth.email, file_id = %file_id, "File deleted");

    let content_type = reply
        .content_type
        .clone()
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));
    let disposition = reply.content_disposition.clone();

    relay_binary(reply, content_type, disposition)
}

/// Buffers every multipart field.
async fn read_fields(mut multipart: Multipart) -> Result<Vec<FormField>, AppError> {
    let mut fields = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        let parsed = match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read upload: {e}")))?;
                FormField::File {
                    name,
                    file_name: Some(file_name),
                    content_type,
                    data,
                }
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read field: {e}")))?;
                FormField::Text { name, value }
            }
        };

        fields.push(parsed);
    }

    Ok(fields)
}

/// Streams a backend reply through with its status and content headers.
/// Header values are passed on as raw bytes.
fn relay_binary(
    reply: BinaryReply,
    content_type: HeaderValue,
    disposition: Option<HeaderValue>,
) -> ApiResult<Response> {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::OK);

    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type);

    if let Some(disposition) = disposition {
        builder = builder.header(header::CONTENT_DISPOSITION, disposition);
    }
    if let Some(length) = reply.content_length {
        builder = builder.header(header::CONTENT_LENGTH, length);
    }

    builder
        .body(Body::from_stream(reply.body))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")).into())
}
