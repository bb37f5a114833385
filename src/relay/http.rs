//! HTTP relay transport using reqwest

use crate::error::Result;
use crate::relay::{Payload, RelayResponse, RelayTransport};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;

/// Relay reached over HTTP(S)
pub struct HttpRelay {
    client: Client,
    endpoint: String,
}

impl HttpRelay {
    /// Create a transport for `endpoint` with a per-request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl RelayTransport for HttpRelay {
    async fn post(&self, payload: &Payload) -> Result<RelayResponse> {
        let mut request = self.client.post(&self.endpoint);
        if let Some(content_type) = payload.content_type() {
            request = request.header(CONTENT_TYPE, content_type);
        }

        request = match payload {
            Payload::UrlEncoded(body) | Payload::Json(body) => request.body(body.clone()),
            Payload::Multipart { fields, file } => {
                let form = fields
                    .iter()
                    .fold(Form::new(), |form, (k, v)| form.text(k.clone(), v.clone()));
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(&file.mime_type)?;
                request.multipart(form.part("file", part))
            }
        };

        debug!(endpoint = %self.endpoint, encoding = %payload, "posting to relay");
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RelayResponse { status, body })
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
