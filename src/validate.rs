//! Local form validation
//!
//! Runs synchronously before any network activity. The same rules back
//! per-field blur checks and the whole-request check on submit.

use crate::types::{Field, FieldState, SubmissionRequest};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("hardcoded email pattern is valid"));

/// Fields that failed validation and a combined reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Offending fields in form order
    pub invalid: Vec<Field>,
    /// Human-readable summary
    pub reason: String,
}

/// Whether `email` has a `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Classify one field of `request`
pub fn check_field(field: Field, request: &SubmissionRequest, max_attachment_bytes: u64) -> FieldState {
    if field_problem(field, request, max_attachment_bytes).is_some() {
        FieldState::Invalid
    } else {
        FieldState::Valid
    }
}

/// Validate a whole request
pub fn validate_request(
    request: &SubmissionRequest,
    max_attachment_bytes: u64,
) -> Result<(), ValidationReport> {
    let mut invalid = Vec::new();
    let mut reasons = Vec::new();

    for field in Field::ALL {
        if let Some(reason) = field_problem(field, request, max_attachment_bytes) {
            invalid.push(field);
            reasons.push(reason);
        }
    }

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(ValidationReport {
            invalid,
            reason: reasons.join("; "),
        })
    }
}

/// Why `field` is invalid, or `None` if it passes
pub fn field_problem(
    field: Field,
    request: &SubmissionRequest,
    max_attachment_bytes: u64,
) -> Option<String> {
    match field {
        Field::Name if request.name.trim().is_empty() => Some("name is required".to_string()),
        Field::Email if request.email.trim().is_empty() => Some("email is required".to_string()),
        Field::Email if !is_valid_email(&request.email) => {
            Some("email is not a valid address".to_string())
        }
        Field::Message if request.message.trim().is_empty() => {
            Some("message is required".to_string())
        }
        Field::File => request
            .attachment
            .as_ref()
            .filter(|a| a.size_bytes > max_attachment_bytes)
            .map(|_| format!("File too large (max {}MB)", max_attachment_bytes / (1024 * 1024))),
        _ => None,
    }
}
