//! Mail relay dispatch
//!
//! The relay accepts a single POST and answers with a short text
//! acknowledgement: `OK` on success, `ERROR: <detail>` otherwise.

mod encode;
mod http;

pub use encode::{Payload, encode_payload};
pub use http::HttpRelay;

use crate::error::Result;
use async_trait::async_trait;

/// Raw relay reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl RelayResponse {
    /// Whether the relay acknowledged the message
    ///
    /// Requires a 2xx status and `OK` (any case) somewhere in the body.
    pub fn is_acknowledged(&self) -> bool {
        (200..300).contains(&self.status) && self.body.to_ascii_lowercase().contains("ok")
    }
}

/// Transport that delivers an encoded payload to the relay
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// POST `payload` once and return the reply
    async fn post(&self, payload: &Payload) -> Result<RelayResponse>;

    /// Endpoint the transport posts to
    fn endpoint(&self) -> &str;
}
