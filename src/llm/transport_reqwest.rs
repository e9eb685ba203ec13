//! Real HTTP transport using reqwest
//!
//! Synchronous blocking HTTP client for the generation clients.

use crate::llm::transport_types::{GenerationError, SyncTransport};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use tracing::debug;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Real HTTP transport using reqwest's blocking client
#[derive(Debug)]
pub struct ReqwestTransport {
    client: Client,
    /// Timeout in seconds for requests
    timeout: u64,
}

impl ReqwestTransport {
    /// Create transport with custom timeout
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GenerationError::ClientInit(e.to_string()))?;

        Ok(Self {
            client,
            timeout: timeout_secs,
        })
    }

    /// Configured timeout in seconds
    pub fn timeout_secs(&self) -> u64 {
        self.timeout
    }
}

fn header_map(headers: &[(&str, &str)]) -> Result<HeaderMap, GenerationError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|_| GenerationError::ClientInit(format!("invalid header name: {}", key)))?;
        // Values may carry credentials, never echo them
        let value = HeaderValue::from_str(value)
            .map_err(|_| GenerationError::ClientInit(format!("invalid value for header {}", key)))?;
        map.insert(name, value);
    }
    Ok(map)
}

impl SyncTransport for ReqwestTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, GenerationError> {
        debug!(url, timeout_secs = self.timeout, body_len = body.len(), "POST");

        let response = self
            .client
            .post(url)
            .headers(header_map(headers)?)
            .body(body.to_string())
            .send()?;

        let status = response.status();
        debug!(status = status.as_u16(), "response received");

        let text = response.text()?;
        if !status.is_success() {
            return Err(GenerationError::Http {
                status: status.as_u16(),
                message: text,
            });
        }

        Ok(text)
    }
}
