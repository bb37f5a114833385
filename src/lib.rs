//! contact-relay - contact form submission pipeline
//!
//! Validates a fixed contact form (name, email, message, optional file),
//! acquires an anti-abuse token, encodes the payload for the mail relay,
//! posts it and reports the outcome back to a form view.

pub mod config;
pub mod error;
pub mod relay;
pub mod submit;
pub mod types;
pub mod validate;
pub mod verify;
