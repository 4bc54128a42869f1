//! reqwest implementation of [`SpacesApi`] against a running gateway.

use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, COOKIE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use spaces_entity::endpoints;
use spaces_core::error::{AppError, ErrorKind, UpstreamReply};
use spaces_core::result::AppResult;
use spaces_entity::{
    Activity, FileId, NewMember, NewSpace, RoleChange, Space, SpaceFile, SpaceId, SpaceUpdate,
};

use crate::api::{Download, FileUpload, SpacesApi};

/// Calls the gateway's `/api` routes, presenting the session cookie.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    cookie: Option<String>,
}

impl GatewayClient {
    /// Creates a client for the gateway at `base_url`, without a session.
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let http = reqwest::Client::builder().build().map_err(|e| {
            AppError::with_source(
                ErrorKind::Internal,
                format!("Failed to build HTTP client: {e}"),
                e,
            )
        })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cookie: None,
        })
    }

    /// Sends `cookie_name=token` with every request.
    pub fn with_session(mut self, cookie_name: &str, token: &str) -> Self {
        self.cookie = Some(format!("{cookie_name}={token}"));
        self
    }

    /// Gateway base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Email of the signed-in user according to the gateway, `None` when
    /// the session is missing or invalid.
    pub async fn session_email(&self) -> AppResult<Option<String>> {
        let body = self
            .json(self.request(Method::GET, "/api/auth/session"))
            .await?;

        Ok(body
            .pointer("/user/email")
            .and_then(|e| e.as_str())
            .map(str::to_string))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    /// Sends the request and turns non-success replies into errors.
    async fn send(&self, builder: RequestBuilder) -> AppResult<Response> {
        let response = builder.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Gateway request failed: {e}"),
                e,
            )
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Gateway replied");

        if status.is_success() {
            return Ok(response);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
        let body = response.bytes().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Failed to read gateway error body: {e}"),
                e,
            )
        })?;

        Err(AppError::upstream(UpstreamReply {
            status: status.as_u16(),
            content_type,
            body: body.to_vec(),
        }))
    }

    async fn json(&self, builder: RequestBuilder) -> AppResult<serde_json::Value> {
        let bytes = self.send(builder).await?.bytes().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Failed to read gateway reply: {e}"),
                e,
            )
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::json!({}));
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn item<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        Ok(serde_json::from_value(self.json(builder).await?)?)
    }

    async fn list<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<Vec<T>> {
        match self.json(builder).await? {
            value @ serde_json::Value::Array(_) => Ok(serde_json::from_value(value)?),
            _ => Ok(Vec::new()),
        }
    }
}

/// Header as text; file names in `Content-Disposition` may be raw UTF-8.
fn header(response: &Response, name: reqwest::header::HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}

#[async_trait]
impl SpacesApi for GatewayClient {
    async fn list_spaces(&self) -> AppResult<Vec<Space>> {
        self.list(self.request(Method::GET, &endpoints::spaces()))
            .await
    }

    async fn get_space(&self, space_id: &SpaceId) -> AppResult<Space> {
        self.item(self.request(Method::GET, &endpoints::space(space_id.as_str())))
            .await
    }

    async fn create_space(&self, space: &NewSpace) -> AppResult<serde_json::Value> {
        self.json(self.request(Method::POST, &endpoints::spaces()).json(space))
            .await
    }

    async fn update_space(
        &self,
        space_id: &SpaceId,
        update: &SpaceUpdate,
    ) -> AppResult<serde_json::Value> {
        self.json(
            self.request(Method::PUT, &endpoints::space(space_id.as_str()))
                .json(update),
        )
        .await
    }

    async fn delete_space(&self, space_id: &SpaceId) -> AppResult<serde_json::Value> {
        self.json(self.request(Method::DELETE, &endpoints::space(space_id.as_str())))
            .await
    }

    async fn list_files(&self, space_id: &SpaceId) -> AppResult<Vec<SpaceFile>> {
        self.list(self.request(Method::GET, &endpoints::space_files(space_id.as_str())))
            .await
    }

    async fn upload_file(
        &self,
        space_id: &SpaceId,
        upload: FileUpload,
    ) -> AppResult<serde_json::Value> {
        let mut part = Part::stream(upload.data).file_name(upload.file_name);
        if let Some(content_type) = upload.content_type {
            part = part.mime_str(&content_type).map_err(|e| {
                AppError::validation(format!("Invalid content type '{content_type}': {e}"))
            })?;
        }
        let form = Form::new().part("file", part);

        self.json(
            self.request(Method::POST, &endpoints::space_files(space_id.as_str()))
                .multipart(form),
        )
        .await
    }

    async fn download_file(&self, file_id: &FileId) -> AppResult<Download> {
        let response = self
            .send(self.request(Method::GET, &endpoints::file(file_id.as_str())))
            .await?;

        let content_type = header(&response, CONTENT_TYPE)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let content_disposition = header(&response, CONTENT_DISPOSITION).unwrap_or_default();
        let data = response.bytes().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Failed to read download: {e}"),
                e,
            )
        })?;

        Ok(Download {
            content_type,
            content_disposition,
            data,
        })
    }

    async fn delete_file(&self, file_id: &FileId) -> AppResult<()> {
        self.send(self.request(Method::DELETE, &endpoints::file(file_id.as_str())))
            .await?;
        Ok(())
    }

    async fn list_activity(&self, space_id: &SpaceId) -> AppResult<Vec<Activity>> {
        self.list(self.request(Method::GET, &endpoints::space_activity(space_id.as_str())))
            .await
    }

    async fn add_member(
        &self,
        space_id: &SpaceId,
        member: &NewMember,
    ) -> AppResult<serde_json::Value> {
        self.json(
            self.request(Method::POST, &endpoints::space_members(space_id.as_str()))
                .json(member),
        )
        .await
    }

    async fn change_role(
        &self,
        space_id: &SpaceId,
        email: &str,
        change: &RoleChange,
    ) -> AppResult<serde_json::Value> {
        self.json(
            self.request(
                Method::PUT,
                &endpoints::space_member(space_id.as_str(), email),
            )
            .json(change),
        )
        .await
    }

    async fn remove_member(
        &self,
        space_id: &SpaceId,
        email: &str,
    ) -> AppResult<serde_json::Value> {
        self.json(self.request(
            Method::DELETE,
            &endpoints::space_member(space_id.as_str(), email),
        ))
        .await
    }
}
