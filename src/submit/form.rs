//! Contact form component
//!
//! Owns the form's values, per-field validity, the status notice and the
//! in-flight guard. Constructed once per form; holds no global state.

use crate::submit::{FormView, SubmissionPipeline};
use crate::types::{Attachment, Field, FieldState, Notice, SubmissionRequest, SubmissionResult};
use crate::validate::check_field;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Notice shown after the relay accepts a message
pub const SUCCESS_NOTICE: &str = "Thank you! We'll reply within 24 hours.";

#[derive(Debug, Default)]
struct FormState {
    values: SubmissionRequest,
    fields: HashMap<Field, FieldState>,
    notice: Option<Notice>,
    // bumped on every notice change so a stale auto-clear can't wipe a newer notice
    notice_generation: u64,
}

impl FormState {
    fn set_notice(&mut self, notice: Option<Notice>) -> u64 {
        self.notice = notice;
        self.notice_generation += 1;
        self.notice_generation
    }
}

/// Clears the busy flag and re-enables the view's submit control when an
/// attempt ends, including when the `submit` future is dropped early
struct BusyGuard<'a> {
    busy: &'a AtomicBool,
    view: &'a dyn FormView,
}

impl<'a> BusyGuard<'a> {
    fn engage(busy: &'a AtomicBool, view: &'a dyn FormView) -> Self {
        view.on_busy(true);
        Self { busy, view }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
        self.view.on_busy(false);
    }
}

/// A contact form bound to one pipeline and one view
pub struct ContactForm {
    pipeline: SubmissionPipeline,
    view: Arc<dyn FormView>,
    state: Arc<Mutex<FormState>>,
    busy: AtomicBool,
}

impl ContactForm {
    /// Create an empty form
    pub fn new(pipeline: SubmissionPipeline, view: Arc<dyn FormView>) -> Self {
        Self {
            pipeline,
            view,
            state: Arc::new(Mutex::new(FormState::default())),
            busy: AtomicBool::new(false),
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set a text field; [`Field::File`] is set with [`ContactForm::attach`]
    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        let mut state = self.state();
        let value = value.into();
        match field {
            Field::Name => state.values.name = value,
            Field::Email => state.values.email = value,
            Field::Message => state.values.message = value,
            Field::File => debug!("ignoring text value for file field"),
        }
    }

    /// Attach a file, replacing any previous one
    pub fn attach(&self, attachment: Attachment) {
        self.state().values.attachment = Some(attachment);
    }

    /// Remove the attachment
    pub fn detach(&self) {
        self.state().values.attachment = None;
    }

    /// Current field values
    pub fn values(&self) -> SubmissionRequest {
        self.state().values.clone()
    }

    /// Last computed validity of `field`
    pub fn field_state(&self, field: Field) -> FieldState {
        self.state().fields.get(&field).copied().unwrap_or_default()
    }

    /// Current status notice
    pub fn notice(&self) -> Option<Notice> {
        self.state().notice.clone()
    }

    /// Whether a submission is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Underlying pipeline
    pub const fn pipeline(&self) -> &SubmissionPipeline {
        &self.pipeline
    }

    /// Re-validate one field, as when the user leaves it
    pub async fn blur(&self, field: Field) -> FieldState {
        let max = self.pipeline.config().max_attachment_bytes;
        let state = {
            let mut form = self.state();
            let state = check_field(field, &form.values, max);
            form.fields.insert(field, state);
            state
        };

        self.view.on_field_state(field, state).await;
        state
    }

    /// Clear values, field classifications and the notice
    pub async fn reset(&self) {
        {
            let mut form = self.state();
            form.values = SubmissionRequest::default();
            form.fields.clear();
            form.set_notice(None);
        }

        for field in Field::ALL {
            self.view.on_field_state(field, FieldState::Unchecked).await;
        }
        self.view.on_notice(None).await;
    }

    /// Submit the current values
    ///
    /// Returns `None` without doing anything if another submission is still
    /// in flight.
    pub async fn submit(&self) -> Option<SubmissionResult> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("submission already in flight, ignoring");
            return None;
        }
        let _guard = BusyGuard::engage(&self.busy, self.view.as_ref());

        let request = self.begin_attempt().await;
        let result = self.pipeline.submit(&request, self.view.as_ref()).await;
        self.finish_attempt(&result).await;

        Some(result)
    }

    /// Clear previous feedback, snapshot values and mark invalid fields
    async fn begin_attempt(&self) -> SubmissionRequest {
        let max = self.pipeline.config().max_attachment_bytes;
        let (request, invalid) = {
            let mut form = self.state();
            form.fields.clear();
            form.set_notice(None);

            let request = form.values.clone();
            let invalid: Vec<Field> = Field::ALL
                .into_iter()
                .filter(|f| check_field(*f, &request, max) == FieldState::Invalid)
                .collect();
            for field in &invalid {
                form.fields.insert(*field, FieldState::Invalid);
            }
            (request, invalid)
        };

        self.view.on_notice(None).await;
        for field in invalid {
            self.view.on_field_state(field, FieldState::Invalid).await;
        }
        request
    }

    async fn finish_attempt(&self, result: &SubmissionResult) {
        let fallback = &self.pipeline.config().fallback_email;
        let notice = match result {
            SubmissionResult::Accepted => Notice::success(SUCCESS_NOTICE),
            SubmissionResult::Rejected { reason } => {
                Notice::error(format!("{reason}. You can also email {fallback} directly."))
            }
            SubmissionResult::TransportFailure { .. } => {
                Notice::error(format!("Failed. Email {fallback} directly."))
            }
        };

        let generation = {
            let mut form = self.state();
            if result.is_accepted() {
                form.values = SubmissionRequest::default();
                form.fields.clear();
            }
            form.set_notice(Some(notice.clone()))
        };

        if result.is_accepted() {
            for field in Field::ALL {
                self.view.on_field_state(field, FieldState::Unchecked).await;
            }
            self.schedule_notice_clear(generation);
        }
        self.view.on_notice(Some(&notice)).await;
    }

    /// Clear a success notice after the configured delay unless it was replaced
    fn schedule_notice_clear(&self, generation: u64) {
        let state = Arc::clone(&self.state);
        let view = Arc::clone(&self.view);
        let delay = self.pipeline.config().notice_clear_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let cleared = {
                let mut form = state.lock().unwrap_or_else(PoisonError::into_inner);
                if form.notice_generation == generation {
                    form.set_notice(None);
                    true
                } else {
                    false
                }
            };
            if cleared {
                view.on_notice(None).await;
            }
        });
    }
}
