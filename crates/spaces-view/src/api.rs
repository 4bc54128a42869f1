//! The gateway operations the controllers depend on.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;

use spaces_core::error::AppError;
use spaces_core::result::AppResult;
use spaces_entity::{
    Activity, FileId, NewMember, NewSpace, RoleChange, Space, SpaceFile, SpaceId,
    SpaceUpdate,
};

/// A file selected for upload.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Name sent as the multipart file name.
    pub file_name: String,
    /// MIME type, when known.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

impl FileUpload {
    /// Reads a local file, guessing its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::validation(format!("Not a file: {}", path.display())))?
            .to_string();

        let data = tokio::fs::read(path).await?;
        let content_type = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string());

        Ok(Self {
            file_name,
            content_type,
            data: Bytes::from(data),
        })
    }
}

/// A downloaded file with the headers the gateway relayed.
#[derive(Debug, Clone)]
pub struct Download {
    /// `Content-Type`.
    pub content_type: String,
    /// `Content-Disposition`, possibly empty.
    pub content_disposition: String,
    /// File contents.
    pub data: Bytes,
}

impl Download {
    /// File name from `Content-Disposition`, reduced to its last path
    /// component so it is always safe to create in the current directory.
    ///
    /// `None` when the header names no file, or the name is only `.`/`..`.
    pub fn file_name(&self) -> Option<String> {
        let name = self
            .content_disposition
            .split(';')
            .map(str::trim)
            .find_map(|part| part.strip_prefix("filename="))?
            .trim_matches('"');

        let base = name.rsplit(['/', '\\']).next().unwrap_or_default().trim();
        match base {
            "" | "." | ".." => None,
            base => Some(base.to_string()),
        }
    }
}

/// Gateway operations, one per forwarding route.
///
/// Failures carry the gateway's answer: an [`ErrorKind::Upstream`] error
/// with the status and raw body for non-success replies, other kinds for
/// transport problems.
///
/// [`ErrorKind::Upstream`]: spaces_core::error::ErrorKind::Upstream
#[async_trait]
pub trait SpacesApi: Send + Sync + std::fmt::Debug + 'static {
    /// Spaces visible to the caller. A non-array answer yields an empty list.
    async fn list_spaces(&self) -> AppResult<Vec<Space>>;

    /// One space, members included.
    async fn get_space(&self, space_id: &SpaceId) -> AppResult<Space>;

    /// Create a space.
    async fn create_space(&self, space: &NewSpace) -> AppResult<serde_json::Value>;

    /// Change a space's name and/or description.
    async fn update_space(
        &self,
        space_id: &SpaceId,
        update: &SpaceUpdate,
    ) -> AppResult<serde_json::Value>;

    /// Delete a space.
    async fn delete_space(&self, space_id: &SpaceId) -> AppResult<serde_json::Value>;

    /// Files in a space.
    async fn list_files(&self, space_id: &SpaceId) -> AppResult<Vec<SpaceFile>>;

    /// Upload one file as the `file` field of a multipart form.
    async fn upload_file(
        &self,
        space_id: &SpaceId,
        upload: FileUpload,
    ) -> AppResult<serde_json::Value>;

    /// Fetch a file's contents.
    async fn download_file(&self, file_id: &FileId) -> AppResult<Download>;

    /// Delete a file.
    async fn delete_file(&self, file_id: &FileId) -> AppResult<()>;

    /// Activity log of a space.
    async fn list_activity(&self, space_id: &SpaceId) -> AppResult<Vec<Activity>>;

    /// Add a member by email.
    async fn add_member(
        &self,
        space_id: &SpaceId,
        member: &NewMember,
    ) -> AppResult<serde_json::Value>;

    /// Change a member's role.
    async fn change_role(
        &self,
        space_id: &SpaceId,
        email: &str,
        change: &RoleChange,
    ) -> AppResult<serde_json::Value>;

    /// Remove a member.
    async fn remove_member(&self, space_id: &SpaceId, email: &str)
    -> AppResult<serde_json::Value>;
}
