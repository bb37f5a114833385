//! Core types for contact-relay

use crate::error::Result;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// One of the fixed contact form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Sender's name
    Name,
    /// Sender's reply address
    Email,
    /// Message body
    Message,
    /// Optional attachment
    File,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Message, Self::File];

    /// Key used for this field on the wire
    pub const fn form_key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
            Self::File => "file",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_key())
    }
}

/// Per-field validity shown next to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    /// Not validated since the last reset
    #[default]
    Unchecked,
    /// Passed validation
    Valid,
    /// Failed validation
    Invalid,
}

/// A file attached to the contact form
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Original file name
    pub file_name: String,
    /// MIME type (e.g. "application/pdf")
    pub mime_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
    /// Size reported for the file
    pub size_bytes: u64,
}

impl Attachment {
    /// Build an attachment from in-memory bytes
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size_bytes = bytes.len() as u64;
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
            size_bytes,
        }
    }

    /// Read an attachment from disk, guessing the MIME type from its extension
    ///
    /// A file larger than `max_bytes` is not read: the returned attachment
    /// carries its size from metadata and no contents, so validation rejects it.
    pub async fn load(path: &Path, max_bytes: u64) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        let size_bytes = tokio::fs::metadata(path).await?.len();
        if size_bytes > max_bytes {
            debug!(file = %file_name, size_bytes, max_bytes, "attachment over limit, not reading");
            return Ok(Self {
                file_name,
                mime_type,
                bytes: Vec::new(),
                size_bytes,
            });
        }

        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(file_name, mime_type, bytes))
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}

/// A single contact submission, read once from the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionRequest {
    /// Sender's name
    pub name: String,
    /// Sender's reply address
    pub email: String,
    /// Message body
    pub message: String,
    /// Optional file
    pub attachment: Option<Attachment>,
}

impl SubmissionRequest {
    /// Create a request without an attachment
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
            attachment: None,
        }
    }

    /// Attach a file
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// Outcome of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// The relay acknowledged the message
    Accepted,
    /// Local validation failed; nothing was sent
    Rejected {
        /// Human-readable reason
        reason: String,
    },
    /// Verification or delivery failed
    TransportFailure {
        /// Raw response text or transport error message
        detail: String,
    },
}

impl SubmissionResult {
    /// Whether the relay accepted the submission
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Kind of status notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Submission went through
    Success,
    /// Submission failed
    Error,
}

/// Message shown in the form's status region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Success or error
    pub kind: NoticeKind,
    /// Text shown to the user
    pub text: String,
}

impl Notice {
    /// Create a success notice
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    /// Create an error notice
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}
