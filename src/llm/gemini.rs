//! Gemini Client
//!
//! Google Generative Language API (`models/*:generateContent`) client.

use crate::llm::transport::{SyncTransport, Transport};
use crate::llm::{GenerationClient, GenerationError};
use reqwest::header::HeaderValue;
use std::fmt;
use tracing::{debug, info};

pub use crate::llm::gemini_parse::{classify_http_error, parse_generate_content};

/// Public Gemini endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the credential
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini `generateContent` client
pub struct GeminiClient {
    /// Base URL (e.g., https://generativelanguage.googleapis.com/v1beta)
    base_url: String,
    /// API key
    api_key: String,
    /// HTTP transport
    transport: Transport,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("transport", &self.transport)
            .finish()
    }
}

impl GeminiClient {
    /// Create a client backed by the real HTTP transport.
    ///
    /// Fails with `GenerationError::ClientInit` when the key is unusable
    /// or the HTTP client cannot be built.
    pub fn new(api_key: &str, base_url: &str, timeout_secs: u64) -> Result<Self, GenerationError> {
        validate_api_key(api_key)?;
        let transport = Transport::real(timeout_secs)?;
        Ok(Self::assemble(api_key, base_url, transport))
    }

    /// Create client with custom transport (for testing)
    pub fn with_transport(
        api_key: &str,
        base_url: &str,
        transport: Transport,
    ) -> Result<Self, GenerationError> {
        validate_api_key(api_key)?;
        Ok(Self::assemble(api_key, base_url, transport))
    }

    fn assemble(api_key: &str, base_url: &str, transport: Transport) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            transport,
        }
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get transport
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Endpoint URL for a model; accepts both `gemini-x` and `models/gemini-x`
    pub fn endpoint(&self, model: &str) -> String {
        let model = model.trim();
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Build `generateContent` request body
    pub fn build_request(prompt: &str) -> String {
        serde_json::json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{"text": prompt}]
                }
            ]
        })
        .to_string()
    }
}

/// Reject credentials that could never be sent as a header value
fn validate_api_key(api_key: &str) -> Result<(), GenerationError> {
    if api_key.trim().is_empty() {
        return Err(GenerationError::ClientInit("API key is empty".to_string()));
    }
    if HeaderValue::from_str(api_key).is_err() {
        return Err(GenerationError::ClientInit(
            "API key contains characters that are not allowed in an HTTP header".to_string(),
        ));
    }
    Ok(())
}

impl GenerationClient for GeminiClient {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        let url = self.endpoint(model);
        let body = Self::build_request(prompt);
        let headers = [
            (API_KEY_HEADER, self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ];

        info!(model, prompt_len = prompt.len(), "calling generateContent");
        let response = self
            .transport
            .post_json(&url, &headers, &body)
            .map_err(|err| match err {
                GenerationError::Http { status, message } => classify_http_error(status, &message),
                other => other,
            })?;

        let text = parse_generate_content(&response)?;
        debug!(response_len = text.len(), "generation complete");
        Ok(text)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}
