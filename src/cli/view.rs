//! Terminal form view with styled output and a spinner

use crate::cli::style::{Stream, Stylize, field_mark, mailto, outcome_mark, spinner_style};
use anstream::{eprintln, println};
use async_trait::async_trait;
use contact_relay::submit::{FormView, Stage};
use contact_relay::types::{Field, FieldState, Notice, NoticeKind};
use indicatif::ProgressBar;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Renders form feedback to the terminal
///
/// Field states and notices are printed; stage changes drive a spinner on
/// stderr, which indicatif hides when stderr is not a terminal.
pub struct CliView {
    fallback_email: String,
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliView {
    /// Create a view that links `fallback_email` in error notices
    pub fn new(fallback_email: impl Into<String>) -> Self {
        Self {
            fallback_email: fallback_email.into(),
            spinner: Mutex::new(None),
        }
    }

    fn spin(&self, message: String) {
        let mut slot = self.spinner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let bar = slot.get_or_insert_with(|| {
            let bar = ProgressBar::new_spinner();
            bar.set_style(spinner_style());
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        });
        bar.set_message(message);
    }

    fn stop(&self) {
        let mut slot = self.spinner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(bar) = slot.take() {
            bar.finish_and_clear();
        }
    }

    fn link_fallback(&self, text: &str) -> String {
        text.replace(&self.fallback_email, &mailto(Stream::Stderr, &self.fallback_email))
    }
}

#[async_trait]
impl FormView for CliView {
    fn on_busy(&self, busy: bool) {
        debug!(busy, "submit control");
    }

    async fn on_field_state(&self, field: Field, state: FieldState) {
        match state {
            FieldState::Valid => println!("  {} {}", field_mark(state), field.accent()),
            FieldState::Invalid => eprintln!(
                "  {} {} {}",
                field_mark(state),
                field.accent().for_stderr(),
                "is invalid".error()
            ),
            FieldState::Unchecked => {}
        }
    }

    async fn on_notice(&self, notice: Option<&Notice>) {
        let Some(notice) = notice else {
            return;
        };

        self.stop();
        match notice.kind {
            NoticeKind::Success => println!("{} {}", outcome_mark(true), notice.text.success()),
            NoticeKind::Error => eprintln!(
                "{} {}",
                outcome_mark(false),
                self.link_fallback(&notice.text).error()
            ),
        }
    }

    async fn on_stage(&self, stage: Stage) {
        match stage {
            Stage::Validating => debug!("validating fields"),
            Stage::Verifying => self.spin(format!("{stage} (anti-abuse check)...")),
            Stage::Sending => self.spin(format!("{stage}...")),
            Stage::Done => self.stop(),
        }
    }
}
