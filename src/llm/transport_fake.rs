//! Fake transport for testing
//!
//! Uses fixture strings instead of real HTTP calls.

use crate::llm::transport_types::{GenerationError, SyncTransport};
use std::sync::Mutex;

/// Request captured by `FakeTransport`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Canned failure returned instead of a body
#[derive(Debug, Clone)]
enum FakeFailure {
    Network(String),
    Status(u16, String),
}

/// Fake transport for testing (uses fixture strings)
#[derive(Debug)]
pub struct FakeTransport {
    /// Response body to return
    response_body: String,
    failure: Option<FakeFailure>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    /// Create fake transport with given response
    pub fn new(response: &str) -> Self {
        Self {
            response_body: response.to_string(),
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create fake transport that returns a network error
    pub fn with_error(msg: &str) -> Self {
        Self {
            failure: Some(FakeFailure::Network(msg.to_string())),
            ..Self::new("")
        }
    }

    /// Create fake transport that answers with a non-2xx status and body
    pub fn with_status(status: u16, body: &str) -> Self {
        Self {
            failure: Some(FakeFailure::Status(status, body.to_string())),
            ..Self::new("")
        }
    }

    /// Requests seen so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Most recent request, if any
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }
}

impl SyncTransport for FakeTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, GenerationError> {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(RecordedRequest {
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                body: body.to_string(),
            });
        }

        match &self.failure {
            Some(FakeFailure::Network(msg)) => Err(GenerationError::Network(msg.clone())),
            Some(FakeFailure::Status(status, body)) => Err(GenerationError::Http {
                status: *status,
                message: body.clone(),
            }),
            None => Ok(self.response_body.clone()),
        }
    }
}
