//! Mock verification service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use contact_relay::error::{Error, Result};
use contact_relay::verify::Verifier;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// Verifier with scripted readiness
pub struct MockVerifier {
    ready_after: u32,
    token: String,
    error_on_execute: Option<String>,
    // Call tracking
    ready_checks: AtomicU32,
    execute_calls: Mutex<Vec<(String, String)>>,
}

impl MockVerifier {
    /// Ready on the `n`th readiness check
    pub fn ready_after(n: u32, token: &str) -> Self {
        Self {
            ready_after: n,
            token: token.to_string(),
            error_on_execute: None,
            ready_checks: AtomicU32::new(0),
            execute_calls: Mutex::new(Vec::new()),
        }
    }

    /// Ready on the first check
    pub fn ready(token: &str) -> Self {
        Self::ready_after(1, token)
    }

    /// Never ready
    pub fn never_ready() -> Self {
        Self::ready_after(u32::MAX, "unused")
    }

    /// Ready, but refuses to issue tokens
    pub fn refusing(msg: &str) -> Self {
        Self {
            error_on_execute: Some(msg.to_string()),
            ..Self::ready("unused")
        }
    }

    /// Number of readiness checks so far
    pub fn ready_checks(&self) -> u32 {
        self.ready_checks.load(Ordering::SeqCst)
    }

    /// `(site_key, action)` pairs passed to `execute`
    pub fn execute_calls(&self) -> Vec<(String, String)> {
        self.execute_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Verifier for MockVerifier {
    async fn is_ready(&self) -> bool {
        self.ready_checks.fetch_add(1, Ordering::SeqCst) + 1 >= self.ready_after
    }

    async fn execute(&self, site_key: &str, action: &str) -> Result<String> {
        self.execute_calls
            .lock()
            .unwrap()
            .push((site_key.to_string(), action.to_string()));

        if let Some(msg) = &self.error_on_execute {
            return Err(Error::Verification(msg.clone()));
        }
        Ok(self.token.clone())
    }
}
