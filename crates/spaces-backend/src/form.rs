//! Multipart form fields forwarded on upload.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};

use spaces_core::error::AppError;

/// One field of an incoming multipart form, buffered for re-encoding.
#[derive(Debug, Clone)]
pub enum FormField {
    /// A plain text field.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// A file field.
    File {
        /// Field name (the upload contract uses `file`).
        name: String,
        /// Client-side file name.
        file_name: Option<String>,
        /// Declared MIME type.
        content_type: Option<String>,
        /// File contents.
        data: Bytes,
    },
}

impl FormField {
    /// The field name.
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Rebuild a multipart form for the backend. reqwest generates a fresh
/// boundary and the matching `Content-Type` header.
pub fn into_form(fields: Vec<FormField>) -> Result<Form, AppError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                let mut part = Part::stream(data);
                if let Some(file_name) = file_name {
                    part = part.file_name(file_name);
                }
                if let Some(content_type) = content_type {
                    part = part.mime_str(&content_type).map_err(|e| {
                        AppError::validation(format!("Invalid content type '{content_type}': {e}"))
                    })?;
                }
                form.part(name, part)
            }
        };
    }
    Ok(form)
}
