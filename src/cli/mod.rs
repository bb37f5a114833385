//! CLI commands
//!
//! Command implementations for the `contact` binary.

mod check;
mod config;
mod send;
pub mod style;
mod view;

pub use check::run_check;
pub use config::run_config;
pub use send::{SendArgs, run_send};
pub use view::CliView;

use contact_relay::error::Result;
use contact_relay::types::{Attachment, SubmissionRequest};
use std::path::PathBuf;

/// Form fields as given on the command line
#[derive(Debug, Clone, Default)]
pub struct FieldArgs {
    /// `--name`
    pub name: Option<String>,
    /// `--email`
    pub email: Option<String>,
    /// `--message`
    pub message: Option<String>,
    /// `--file`
    pub file: Option<PathBuf>,
}

impl FieldArgs {
    /// Build a request, loading the attachment from disk
    ///
    /// Files over `max_attachment_bytes` are sized but not read.
    pub async fn into_request(self, max_attachment_bytes: u64) -> Result<SubmissionRequest> {
        let attachment = match &self.file {
            Some(path) => Some(Attachment::load(path, max_attachment_bytes).await?),
            None => None,
        };

        Ok(SubmissionRequest {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            message: self.message.unwrap_or_default(),
            attachment,
        })
    }
}
