//! Mock relay transport for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use contact_relay::error::{Error, Result};
use contact_relay::relay::{Payload, RelayResponse, RelayTransport};
use std::sync::Arc;
use std::sync::Mutex;
use tokio::sync::Notify;

/// Canned reply for `post`
#[derive(Debug, Clone)]
enum Reply {
    Response(RelayResponse),
    NetworkError(String),
}

/// Manually implemented relay mock
///
/// Features:
/// - Configurable reply (status + body, or a network error)
/// - Call tracking for verification
/// - Optional gate that holds `post` open until released
pub struct MockRelay {
    reply: Mutex<Reply>,
    calls: Mutex<Vec<Payload>>,
    gate: Option<Arc<Notify>>,
}

impl MockRelay {
    /// Reply with `status` and `body`
    pub fn replying(status: u16, body: &str) -> Self {
        Self {
            reply: Mutex::new(Reply::Response(RelayResponse {
                status,
                body: body.to_string(),
            })),
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Reply `200 OK`
    pub fn ok() -> Self {
        Self::replying(200, "OK")
    }

    /// Fail every post with a transport error
    pub fn unreachable(msg: &str) -> Self {
        Self {
            reply: Mutex::new(Reply::NetworkError(msg.to_string())),
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Hold each post until the returned `Notify` is signalled
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    /// Change the reply for subsequent posts
    pub fn set_reply(&self, status: u16, body: &str) {
        *self.reply.lock().unwrap() = Reply::Response(RelayResponse {
            status,
            body: body.to_string(),
        });
    }

    // === Call verification methods ===

    /// All payloads posted so far
    pub fn calls(&self) -> Vec<Payload> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of posts
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The only payload posted; panics unless exactly one post happened
    pub fn single_call(&self) -> Payload {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one post, got {calls:?}");
        calls.into_iter().next().unwrap()
    }
}

#[async_trait]
impl RelayTransport for MockRelay {
    async fn post(&self, payload: &Payload) -> Result<RelayResponse> {
        self.calls.lock().unwrap().push(payload.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let reply = self.reply.lock().unwrap().clone();
        match reply {
            Reply::Response(response) => Ok(response),
            Reply::NetworkError(msg) => Err(Error::Transport(msg)),
        }
    }

    fn endpoint(&self) -> &str {
        "mock://relay"
    }
}
