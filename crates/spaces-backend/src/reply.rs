//! Successful backend replies.

use std::pin::Pin;

use bytes::Bytes;
use futures::Stream;
use reqwest::header::HeaderValue;

/// Streamed response body.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// A decoded JSON reply.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonReply {
    /// Backend status (always 2xx).
    pub status: u16,
    /// Decoded body; an empty body decodes to `{}`.
    pub body: serde_json::Value,
}

/// A reply relayed byte-for-byte together with its content headers.
pub struct BinaryReply {
    /// Backend status (always 2xx).
    pub status: u16,
    /// Backend `Content-Type`, as sent.
    pub content_type: Option<HeaderValue>,
    /// Backend `Content-Disposition`, as sent (may carry raw UTF-8).
    pub content_disposition: Option<HeaderValue>,
    /// Backend `Content-Length`, when known.
    pub content_length: Option<u64>,
    /// The payload.
    pub body: ByteStream,
}

impl std::fmt::Debug for BinaryReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryReply")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .field("content_disposition", &self.content_disposition)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}
