//! Anti-abuse verification
//!
//! A verification service issues a single-use token for a `(site_key, action)`
//! pair. The service may still be starting when a submission begins, so
//! readiness is polled under a bounded [`ReadinessPolicy`] before a token is
//! requested.

mod command;
mod factory;
mod token;

pub use command::CommandVerifier;
pub use factory::create_verifier;
pub use token::StaticVerifier;

use crate::config::ReadinessPolicy;
use crate::error::{Error, Result};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Token-issuing verification service
#[async_trait]
pub trait Verifier: Send + Sync {
    /// Whether the service can issue tokens right now
    async fn is_ready(&self) -> bool;

    /// Issue a token for `action` under `site_key`
    async fn execute(&self, site_key: &str, action: &str) -> Result<String>;
}

/// Wait for `verifier` to become ready, then request a token
///
/// Readiness is checked up to `policy.max_attempts` times, `policy.interval`
/// apart. Exhausting the budget or cancelling `cancel` yields
/// [`Error::VerificationUnavailable`].
pub async fn acquire_token(
    verifier: &dyn Verifier,
    site_key: &str,
    action: &str,
    policy: ReadinessPolicy,
    cancel: &CancellationToken,
) -> Result<String> {
    wait_until_ready(verifier, policy, cancel).await?;

    let token = verifier.execute(site_key, action).await?;
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::Verification("service returned an empty token".to_string()));
    }

    debug!(action, "verification token acquired");
    Ok(token.to_string())
}

async fn wait_until_ready(
    verifier: &dyn Verifier,
    policy: ReadinessPolicy,
    cancel: &CancellationToken,
) -> Result<()> {
    for attempt in 1..=policy.max_attempts {
        if verifier.is_ready().await {
            debug!(attempt, "verification service ready");
            return Ok(());
        }

        tokio::select! {
            () = cancel.cancelled() => {
                debug!(attempt, "verification wait cancelled");
                return Err(Error::VerificationUnavailable);
            }
            () = tokio::time::sleep(policy.interval) => {}
        }
    }

    warn!(
        attempts = policy.max_attempts,
        budget_ms = u64::try_from(policy.budget().as_millis()).unwrap_or(u64::MAX),
        "verification service never became ready"
    );
    Err(Error::VerificationUnavailable)
}
