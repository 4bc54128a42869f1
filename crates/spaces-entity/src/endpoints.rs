//! Backend paths.
//!
//! Every substituted segment is percent-encoded the way a browser's
//! `encodeURIComponent` does it, so emails (`@`, `+`) and ids with reserved
//! characters reach the backend intact.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left alone by component encoding.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode one path segment.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, COMPONENT).to_string()
}

/// `/api/spaces`
pub fn spaces() -> String {
    "/api/spaces".to_string()
}

/// `/api/spaces/{id}`
pub fn space(space_id: &str) -> String {
    format!("/api/spaces/{}", encode_segment(space_id))
}

/// `/api/spaces/{id}/files`
pub fn space_files(space_id: &str) -> String {
    format!("{}/files", space(space_id))
}

/// `/api/spaces/{id}/activity`
pub fn space_activity(space_id: &str) -> String {
    format!("{}/activity", space(space_id))
}

/// `/api/spaces/{id}/members`
pub fn space_members(space_id: &str) -> String {
    format!("{}/members", space(space_id))
}

/// `/api/spaces/{id}/members/{email}`
pub fn space_member(space_id: &str, email: &str) -> String {
    format!("{}/{}", space_members(space_id), encode_segment(email))
}

/// `/api/files/{fileId}`
pub fn file(file_id: &str) -> String {
    format!("/api/files/{}", encode_segment(file_id))
}
