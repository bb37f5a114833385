//! Verifier factory
//!
//! Picks a verification source from configuration.

use crate::config::ContactConfig;
use crate::error::{Error, Result};
use crate::verify::{CommandVerifier, StaticVerifier, Verifier};
use std::sync::Arc;

/// Create a verifier from configuration
///
/// Priority:
/// 1. token helper command (`CONTACT_VERIFY_CMD` / `verify_command`)
/// 2. pre-issued token (`CONTACT_VERIFY_TOKEN`)
pub fn create_verifier(config: &ContactConfig) -> Result<Arc<dyn Verifier>> {
    if let Some(cmd) = &config.verify_command {
        return Ok(Arc::new(CommandVerifier::new(cmd)?));
    }

    if let Some(token) = &config.verify_token {
        return Ok(Arc::new(StaticVerifier::new(token.clone())));
    }

    Err(Error::Config(
        "No verification source configured. Set CONTACT_VERIFY_CMD or CONTACT_VERIFY_TOKEN"
            .to_string(),
    ))
}
