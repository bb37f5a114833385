//! Wire encodings for a submission
//!
//! Exactly one encoding is used per attempt:
//! - no attachment: url-encoded form
//! - attachment + [`EncodingMode::Multipart`]: multipart form with the raw file
//! - attachment + [`EncodingMode::InlineBase64`]: JSON with the file base64-encoded

use crate::config::{EncodingMode, TOKEN_FIELD};
use crate::error::Result;
use crate::types::{Attachment, Field, SubmissionRequest};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::Serialize;
use std::fmt;

/// Encoded request body, ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// `application/x-www-form-urlencoded` body
    UrlEncoded(String),
    /// Text fields plus one file part; the client picks the boundary
    Multipart {
        /// Text fields in wire order (token last)
        fields: Vec<(String, String)>,
        /// File sent as the `file` part
        file: Attachment,
    },
    /// `application/json` body
    Json(String),
}

impl Payload {
    /// Explicit content type, if the body needs one set by hand
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::UrlEncoded(_) => Some("application/x-www-form-urlencoded"),
            Self::Multipart { .. } => None,
            Self::Json(_) => Some("application/json"),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UrlEncoded(_) => write!(f, "url-encoded form"),
            Self::Multipart { .. } => write!(f, "multipart form"),
            Self::Json(_) => write!(f, "JSON with inline base64 file"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineFileBody<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    file_name: &'a str,
    file_type: &'a str,
    file_data: String,
    #[serde(rename = "g-recaptcha-response")]
    token: &'a str,
}

/// Encode `request` with the anti-abuse `token` appended
pub fn encode_payload(
    request: &SubmissionRequest,
    token: &str,
    mode: EncodingMode,
) -> Result<Payload> {
    let Some(file) = &request.attachment else {
        let body = text_fields(request, token)
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        return Ok(Payload::UrlEncoded(body));
    };

    match mode {
        EncodingMode::Multipart => Ok(Payload::Multipart {
            fields: text_fields(request, token),
            file: file.clone(),
        }),
        EncodingMode::InlineBase64 => {
            let body = InlineFileBody {
                name: request.name.trim(),
                email: request.email.trim(),
                message: &request.message,
                file_name: &file.file_name,
                file_type: &file.mime_type,
                file_data: BASE64.encode(&file.bytes),
                token,
            };
            Ok(Payload::Json(serde_json::to_string(&body)?))
        }
    }
}

fn text_fields(request: &SubmissionRequest, token: &str) -> Vec<(String, String)> {
    vec![
        (Field::Name.form_key().to_string(), request.name.trim().to_string()),
        (Field::Email.form_key().to_string(), request.email.trim().to_string()),
        (Field::Message.form_key().to_string(), request.message.clone()),
        (TOKEN_FIELD.to_string(), token.to_string()),
    ]
}
