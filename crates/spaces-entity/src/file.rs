//! File metadata model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::FileId;

/// Metadata of a file stored in a space. Content lives in the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceFile {
    /// Backend identifier.
    pub id: FileId,
    /// Name the file was uploaded with.
    pub original_filename: String,
    /// Size in bytes.
    pub size: u64,
    /// Email of the uploader.
    pub uploader_email: String,
    /// Upload time.
    #[serde(with = "crate::timestamp::required")]
    pub uploaded_at: DateTime<Utc>,
    /// MIME type, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}
