//! Validation, verification and dispatch stages

use crate::config::ContactConfig;
use crate::error::{Error, Result};
use crate::relay::{Payload, RelayTransport, encode_payload};
use crate::submit::{FormView, Stage};
use crate::types::{SubmissionRequest, SubmissionResult};
use crate::validate::validate_request;
use crate::verify::{Verifier, acquire_token};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Token placeholder used when previewing a payload
const PREVIEW_TOKEN: &str = "<verification-token>";

/// Runs one submission attempt end to end
///
/// Stateless between attempts: every call validates, fetches a fresh token
/// and posts exactly once. Stage failures are folded into the returned
/// [`SubmissionResult`].
pub struct SubmissionPipeline {
    config: ContactConfig,
    verifier: Arc<dyn Verifier>,
    relay: Arc<dyn RelayTransport>,
    shutdown: CancellationToken,
}

impl SubmissionPipeline {
    /// Create a pipeline from its collaborators
    pub fn new(
        config: ContactConfig,
        verifier: Arc<dyn Verifier>,
        relay: Arc<dyn RelayTransport>,
    ) -> Self {
        Self {
            config,
            verifier,
            relay,
            shutdown: CancellationToken::new(),
        }
    }

    /// Pipeline configuration
    pub const fn config(&self) -> &ContactConfig {
        &self.config
    }

    /// Token that aborts any pending verification wait when cancelled
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Run validation, verification and dispatch for `request`
    pub async fn submit(&self, request: &SubmissionRequest, view: &dyn FormView) -> SubmissionResult {
        let result = self.run_stages(request, view).await;
        view.on_stage(Stage::Done).await;
        result
    }

    async fn run_stages(&self, request: &SubmissionRequest, view: &dyn FormView) -> SubmissionResult {
        view.on_stage(Stage::Validating).await;
        if let Err(report) = validate_request(request, self.config.max_attachment_bytes) {
            debug!(fields = ?report.invalid, "submission rejected locally");
            return SubmissionResult::Rejected {
                reason: report.reason,
            };
        }

        view.on_stage(Stage::Verifying).await;
        let token = match acquire_token(
            self.verifier.as_ref(),
            &self.config.site_key,
            &self.config.action,
            self.config.readiness,
            &self.shutdown.child_token(),
        )
        .await
        {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "could not obtain verification token");
                return SubmissionResult::TransportFailure {
                    detail: e.to_string(),
                };
            }
        };

        let payload = match encode_payload(request, &token, self.config.encoding) {
            Ok(payload) => payload,
            Err(e) => {
                return SubmissionResult::TransportFailure {
                    detail: e.to_string(),
                };
            }
        };

        view.on_stage(Stage::Sending).await;
        match self.relay.post(&payload).await {
            Ok(response) if response.is_acknowledged() => {
                info!(endpoint = self.relay.endpoint(), encoding = %payload, "relay accepted submission");
                SubmissionResult::Accepted
            }
            Ok(response) => {
                warn!(status = response.status, body = %response.body, "relay did not acknowledge submission");
                let detail = if response.body.trim().is_empty() {
                    format!("relay answered HTTP {} with an empty body", response.status)
                } else {
                    response.body
                };
                SubmissionResult::TransportFailure { detail }
            }
            Err(e) => {
                warn!(error = %e, "relay request failed");
                SubmissionResult::TransportFailure {
                    detail: e.to_string(),
                }
            }
        }
    }
}

/// Validate and encode `request` without contacting any service
///
/// The token field carries a placeholder.
pub fn preview_submission(config: &ContactConfig, request: &SubmissionRequest) -> Result<Payload> {
    validate_request(request, config.max_attachment_bytes)
        .map_err(|report| Error::Validation(report.reason))?;
    encode_payload(request, PREVIEW_TOKEN, config.encoding)
}
