//! Test fixtures for building forms and inspecting view events

#![allow(dead_code)]

use super::mock_relay::MockRelay;
use super::mock_verifier::MockVerifier;
use async_trait::async_trait;
use contact_relay::config::{ContactConfig, EncodingMode};
use contact_relay::submit::{ContactForm, FormView, Stage, SubmissionPipeline};
use contact_relay::types::{Attachment, Field, FieldState, Notice, SubmissionRequest};
use std::sync::{Arc, Mutex};

/// Fallback address used by [`config`]
pub const FALLBACK: &str = "help@example.org";

/// One callback received by [`RecordingView`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Busy(bool),
    Field(Field, FieldState),
    Notice(Option<Notice>),
    Stage(Stage),
}

/// View that records every callback in order
#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn busy_events(&self) -> Vec<bool> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Busy(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Stage(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn invalid_fields(&self) -> Vec<Field> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Field(f, FieldState::Invalid) => Some(f),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl FormView for RecordingView {
    fn on_busy(&self, busy: bool) {
        self.push(ViewEvent::Busy(busy));
    }

    async fn on_field_state(&self, field: Field, state: FieldState) {
        self.push(ViewEvent::Field(field, state));
    }

    async fn on_notice(&self, notice: Option<&Notice>) {
        self.push(ViewEvent::Notice(notice.cloned()));
    }

    async fn on_stage(&self, stage: Stage) {
        self.push(ViewEvent::Stage(stage));
    }
}

/// Default config with a recognisable fallback address
pub fn config() -> ContactConfig {
    ContactConfig {
        fallback_email: FALLBACK.to_string(),
        ..ContactConfig::default()
    }
}

/// Config using the given attachment encoding
pub fn config_with_encoding(encoding: EncodingMode) -> ContactConfig {
    ContactConfig {
        encoding,
        ..config()
    }
}

/// A request that passes validation
pub fn valid_request() -> SubmissionRequest {
    SubmissionRequest::new("Ada Lovelace", "ada@example.com", "Hello there")
}

/// Small PDF attachment
pub fn pdf_attachment() -> Attachment {
    Attachment::new("brief.pdf", "application/pdf", b"%PDF-1.4".to_vec())
}

/// Attachment reporting `size_bytes` without allocating that much
pub fn attachment_of_size(size_bytes: u64) -> Attachment {
    Attachment {
        size_bytes,
        ..Attachment::new("big.bin", "application/octet-stream", vec![0; 16])
    }
}

/// A form wired to mocks, plus handles to inspect them
pub struct Harness {
    pub form: Arc<ContactForm>,
    pub relay: Arc<MockRelay>,
    pub verifier: Arc<MockVerifier>,
    pub view: Arc<RecordingView>,
}

impl Harness {
    /// Fill the text fields (and attachment) from `request`
    pub fn fill(&self, request: &SubmissionRequest) {
        self.form.set_field(Field::Name, request.name.clone());
        self.form.set_field(Field::Email, request.email.clone());
        self.form.set_field(Field::Message, request.message.clone());
        match &request.attachment {
            Some(attachment) => self.form.attach(attachment.clone()),
            None => self.form.detach(),
        }
    }
}

/// Build a form around the given collaborators
pub fn build_form(config: ContactConfig, verifier: MockVerifier, relay: MockRelay) -> Harness {
    let verifier = Arc::new(verifier);
    let relay = Arc::new(relay);
    let view = Arc::new(RecordingView::default());
    let pipeline = SubmissionPipeline::new(
        config,
        Arc::clone(&verifier) as _,
        Arc::clone(&relay) as _,
    );
    let form = Arc::new(ContactForm::new(pipeline, Arc::clone(&view) as _));

    Harness {
        form,
        relay,
        verifier,
        view,
    }
}

/// Form with an immediately ready verifier and a relay answering `OK`
pub fn default_form() -> Harness {
    build_form(config(), MockVerifier::ready("tok-123"), MockRelay::ok())
}
