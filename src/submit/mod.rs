//! Contact submission
//!
//! A submission runs through four stages:
//! 1. Validation - local field checks, no network
//! 2. Verification - bounded wait for an anti-abuse token
//! 3. Dispatch - encode and POST to the relay
//! 4. Status - update the form and its notice region
//!
//! [`SubmissionPipeline`] runs stages 1-3; [`ContactForm`] owns the form
//! state, the in-flight guard and stage 4.

mod form;
mod pipeline;
mod view;

pub use form::{ContactForm, SUCCESS_NOTICE};
pub use pipeline::{SubmissionPipeline, preview_submission};
pub use view::{FormView, NoopView, Stage};
