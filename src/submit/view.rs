//! Form view callback trait for interface-agnostic feedback
//!
//! The form reports busy state, field validity, notices and pipeline stages
//! through this trait so a terminal, a web page or a test can render them.

use crate::types::{Field, FieldState, Notice};
use async_trait::async_trait;
use std::fmt;

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Checking fields locally
    Validating,
    /// Waiting for the verification token
    Verifying,
    /// Posting to the relay
    Sending,
    /// Attempt finished
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validating => write!(f, "Validating"),
            Self::Verifying => write!(f, "Verifying"),
            Self::Sending => write!(f, "Sending"),
            Self::Done => write!(f, "Done"),
        }
    }
}

/// Receives form feedback
#[async_trait]
pub trait FormView: Send + Sync {
    /// Submit control should be disabled (`true`) or re-enabled (`false`)
    ///
    /// Synchronous so the re-enable can be sent from a drop guard when a
    /// submission future is abandoned mid-flight.
    fn on_busy(&self, busy: bool);

    /// A field was (re)classified
    async fn on_field_state(&self, field: Field, state: FieldState);

    /// The status region changed; `None` clears it
    async fn on_notice(&self, notice: Option<&Notice>);

    /// The pipeline entered a new stage
    async fn on_stage(&self, stage: Stage);
}

/// View that ignores everything
pub struct NoopView;

#[async_trait]
impl FormView for NoopView {
    fn on_busy(&self, _busy: bool) {}
    async fn on_field_state(&self, _field: Field, _state: FieldState) {}
    async fn on_notice(&self, _notice: Option<&Notice>) {}
    async fn on_stage(&self, _stage: Stage) {}
}
