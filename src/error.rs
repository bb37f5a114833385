//! Error types for contact-relay

use thiserror::Error;

/// Errors produced by the submission pipeline and its collaborators
#[derive(Debug, Error)]
pub enum Error {
    /// One or more form fields failed validation
    #[error("validation failed: {0}")]
    Validation(String),

    /// The verification service never became ready within the polling budget
    #[error("verification unavailable")]
    VerificationUnavailable,

    /// The verification service was ready but refused to issue a token
    #[error("verification failed: {0}")]
    Verification(String),

    /// The relay rejected the request or replied without an acknowledgement
    #[error("{0}")]
    Transport(String),

    /// Network-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem or process I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias using the crate error type
pub type Result<T> = std::result::Result<T, Error>;
