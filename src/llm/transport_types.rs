//! Transport types
//!
//! Error type and transport trait shared by the generation clients and
//! every transport implementation.

/// Generation client errors
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Client could not be constructed (bad credential, HTTP client build failure)
    #[error("Client initialization failed: {0}")]
    ClientInit(String),

    /// Network error (connection refused, timeout, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP error (non-2xx status)
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limited or quota exhausted
    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    /// Provider-specific error envelope
    #[error("Provider error: {code} - {message}")]
    Provider { code: String, message: String },

    /// Generation refused by the provider's safety filters
    #[error("Blocked by safety filters: {reason}")]
    Blocked { reason: String },

    /// Response did not carry the expected fields
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(String),
}

impl GenerationError {
    /// True for the content-safety rejection sub-case
    pub fn is_blocked(&self) -> bool {
        matches!(self, GenerationError::Blocked { .. })
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::Json(err.to_string())
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => GenerationError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => GenerationError::Network(err.to_string()),
        }
    }
}

/// Synchronous HTTP transport
///
/// Abstraction over the HTTP client so clients can be tested with
/// `FakeTransport`.
pub trait SyncTransport: Send + Sync {
    /// POST a JSON body and return the response body.
    ///
    /// Non-2xx statuses are reported as `GenerationError::Http` with the
    /// response body as the message, so callers can decode provider
    /// error envelopes.
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, GenerationError>;
}
