//! The backend HTTP client.

use std::time::Duration;

use futures::TryStreamExt;
use reqwest::header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE, HeaderName, HeaderValue};
use reqwest::{Method, Response};
use tracing::{debug, warn};

use spaces_auth::Credential;
use spaces_core::config::BackendConfig;
use spaces_core::error::{AppError, ErrorKind, UpstreamReply};
use spaces_core::result::AppResult;
use spaces_entity::endpoints;

use crate::form::{self, FormField};
use crate::reply::{BinaryReply, JsonReply};

/// Request body sent to the backend.
#[derive(Debug, Clone, Default)]
pub enum BackendBody {
    /// No body.
    #[default]
    Empty,
    /// A JSON document.
    Json(serde_json::Value),
    /// A multipart form (file upload).
    Multipart(Vec<FormField>),
}

/// Talks to the backend service on behalf of one caller at a time.
///
/// Holds only the pooled HTTP client and the origin; the caller's
/// credential is passed into every call.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    origin: String,
}

impl BackendClient {
    /// Creates a client from backend configuration.
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if config.connect_timeout_seconds > 0 {
            builder = builder.connect_timeout(Duration::from_secs(config.connect_timeout_seconds));
        }
        if config.request_timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_seconds));
        }
        let http = builder.build().map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to build backend HTTP client: {e}"),
                e,
            )
        })?;

        Ok(Self {
            http,
            origin: config.origin().to_string(),
        })
    }

    /// Backend origin without a trailing slash.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Sends one request and turns any non-2xx reply into an upstream error.
    async fn send(
        &self,
        credential: &Credential,
        method: Method,
        path: &str,
        body: BackendBody,
    ) -> AppResult<Response> {
        let url = format!("{}{}", self.origin, path);
        debug!(method = %method, path = %path, "Forwarding to backend");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(AUTHORIZATION, credential.authorization());

        request = match body {
            BackendBody::Empty => request,
            BackendBody::Json(value) => request.json(&value),
            BackendBody::Multipart(fields) => request.multipart(form::into_form(fields)?),
        };

        let response = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Backend request failed: {e}"),
                e,
            )
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(method = %method, path = %path, status = status.as_u16(), "Backend replied");
            return Ok(response);
        }

        let content_type = header_string(&response, CONTENT_TYPE);
        let body = response.bytes().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Failed to read backend error body: {e}"),
                e,
            )
        })?;

        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            "Backend rejected request"
        );

        Err(AppError::upstream(UpstreamReply {
            status: status.as_u16(),
            content_type,
            body: body.to_vec(),
        }))
    }

    /// Sends a request and decodes the JSON reply.
    pub async fn request_json(
        &self,
        credential: &Credential,
        method: Method,
        path: &str,
        body: BackendBody,
    ) -> AppResult<JsonReply> {
        let response = self
            .send(credential, method, path, body)
            .await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Failed to read backend reply: {e}"),
                e,
            )
        })?;

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            serde_json::json!({})
        } else {
            serde_json::from_slice(&bytes).map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("Backend returned invalid JSON: {e}"),
                    e,
                )
            })?
        };

        Ok(JsonReply { status, body })
    }

    /// Sends a request and hands back the reply as a stream plus its
    /// content headers.
    pub async fn request_binary(
        &self,
        credential: &Credential,
        method: Method,
        path: &str,
    ) -> AppResult<BinaryReply> {
        let response = self
            .send(credential, method, path, BackendBody::Empty)
            .await?;

        Ok(BinaryReply {
            status: response.status().as_u16(),
            content_type: raw_header(&response, CONTENT_TYPE),
            content_disposition: raw_header(&response, CONTENT_DISPOSITION),
            content_length: response.content_length(),
            body: Box::pin(response.bytes_stream().map_err(std::io::Error::other)),
        })
    }

    // ── Spaces ───────────────────────────────────────────────

    /// GET /api/spaces
    pub async fn list_spaces(&self, credential: &Credential) -> AppResult<JsonReply> {
        self.request_json(credential, Method::GET, &endpoints::spaces(), BackendBody::Empty)
            .await
    }

    /// POST /api/spaces
    pub async fn create_space(
        &self,
        credential: &Credential,
        body: serde_json::Value,
    ) -> AppResult<JsonReply> {
        self.request_json(
            credential,
            Method::POST,
            &endpoints::spaces(),
            BackendBody::Json(body),
        )
        .await
    }

    /// GET /api/spaces/{id}
    pub async fn get_space(&self, credential: &Credential, space_id: &str) -> AppResult<JsonReply> {
        self.request_json(
            credential,
            Method::GET,
            &endpoints::space(space_id),
            BackendBody::Empty,
        )
        .await
    }

    /// PUT /api/spaces/{id}
    pub async fn update_space(
        &self,
        credential: &Credential,
        space_id: &str,
        body: serde_json::Value,
    ) -> AppResult<JsonReply> {
        self.request_json(
            credential,
            Method::PUT,
            &endpoints::space(space_id),
            BackendBody::Json(body),
        )
        .await
    }

    /// DELETE /api/spaces/{id}
    pub async fn delete_space(
        &self,
        credential: &Credential,
        space_id: &str,
    ) -> AppResult<JsonReply> {
        self.request_json(
            credential,
            Method::DELETE,
            &endpoints::space(space_id),
            BackendBody::Empty,
        )
        .await
    }

    // ── Files ────────────────────────────────────────────────

    /// GET /api/spaces/{id}/files
    pub async fn list_files(&self, credential: &Credential, space_id: &str) -> AppResult<JsonReply> {
        self.request_json(
            credential,
            Method::GET,
            &endpoints::space_files(space_id),
            BackendBody::Empty,
        )
        .await
    }

    /// POST /api/spaces/{id}/files (multipart)
    pub async fn upload_file(
        &self,
        credential: &Credential,
        space_id: &str,
        fields: Vec<FormField>,
    ) -> AppResult<JsonReply> {
        self.request_json(
            credential,
            Method::POST,
            &endpoints::space_files(space_id),
            BackendBody::Multipart(fields),
        )
        .await
    }

    /// GET /api/files/{fileId}
    pub async fn download_file(
        &self,
        credential: &Credential,
        file_id: &str,
    ) -> AppResult<BinaryReply> {
        self.request_binary(credential, Method::GET, &endpoints::file(file_id))
            .await
    }

    /// DELETE /api/files/{fileId}
    pub async fn delete_file(
        &self,
        credential: &Credential,
        file_id: &str,
    ) -> AppResult<BinaryReply> {
        self.request_binary(credential, Method::DELETE, &endpoints::file(file_id))
            .await
    }

    // ── Activity ─────────────────────────────────────────────

    /// GET /api/spaces/{id}/activity
    pub async fn list_activity(
        &self,
        credential: &Credential,
        space_id: &str,
    ) -> AppResult<JsonReply> {
        self.request_json(
            credential,
            Method::GET,
            &endpoints::space_activity(space_id),
            BackendBody::Empty,
        )
        .await
    }

    // ── Members ──────────────────────────────────────────────

    /// POST /api/spaces/{id}/members
    pub async fn add_member(
        &self,
        credential: &Credential,
        space_id: &str,
        body: serde_json::Value,
    ) -> AppResult<JsonReply> {
        self.request_json(
            credential,
            Method::POST,
            &endpoints::space_members(space_id),
            BackendBody::Json(body),
        )
        .await
    }

    /// PUT /api/spaces/{id}/members/{email}
    pub async fn change_member_role(
        &self,
        credential: &Credential,
        space_id: &str,
        email: &str,
        body: serde_json::Value,
    ) -> AppResult<JsonReply> {
        self.request_json(
            credential,
            Method::PUT,
            &endpoints::space_member(space_id, email),
            BackendBody::Json(body),
        )
        .await
    }

    /// DELETE /api/spaces/{id}/members/{email}
    pub async fn remove_member(
        &self,
        credential: &Credential,
        space_id: &str,
        email: &str,
    ) -> AppResult<JsonReply> {
        self.request_json(
            credential,
            Method::DELETE,
            &endpoints::space_member(space_id, email),
            BackendBody::Empty,
        )
        .await
    }
}

/// Header value kept byte-for-byte; backends write raw UTF-8 file names.
fn raw_header(response: &Response, name: HeaderName) -> Option<HeaderValue> {
    response.headers().get(name).cloned()
}

fn header_string(response: &Response, name: HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}
