//! Stub Client
//!
//! Testing client that returns canned responses without network calls.

use crate::llm::{GenerationClient, GenerationError};
use std::cell::{Cell, RefCell};

/// Canned outcome for `StubClient`
#[derive(Debug, Clone)]
enum StubReply {
    Text(String),
    Network(String),
    Blocked(String),
}

/// Stub client for testing (returns fake responses, counts calls)
#[derive(Debug)]
pub struct StubClient {
    reply: StubReply,
    calls: Cell<usize>,
    last_prompt: RefCell<Option<String>>,
    last_model: RefCell<Option<String>>,
}

impl StubClient {
    /// Stub that answers every call with `response`
    pub fn with_response(response: &str) -> Self {
        Self::from_reply(StubReply::Text(response.to_string()))
    }

    /// Stub whose calls fail with a network error
    pub fn failing(message: &str) -> Self {
        Self::from_reply(StubReply::Network(message.to_string()))
    }

    /// Stub whose calls are refused by safety filters
    pub fn blocked(reason: &str) -> Self {
        Self::from_reply(StubReply::Blocked(reason.to_string()))
    }

    fn from_reply(reply: StubReply) -> Self {
        Self {
            reply,
            calls: Cell::new(0),
            last_prompt: RefCell::new(None),
            last_model: RefCell::new(None),
        }
    }

    /// Number of `generate` calls made
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Prompt passed to the most recent call
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.borrow().clone()
    }

    /// Model passed to the most recent call
    pub fn last_model(&self) -> Option<String> {
        self.last_model.borrow().clone()
    }
}

impl GenerationClient for StubClient {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_prompt.borrow_mut() = Some(prompt.to_string());
        *self.last_model.borrow_mut() = Some(model.to_string());

        match &self.reply {
            StubReply::Text(text) => Ok(text.clone()),
            StubReply::Network(msg) => Err(GenerationError::Network(msg.clone())),
            StubReply::Blocked(reason) => Err(GenerationError::Blocked {
                reason: reason.clone(),
            }),
        }
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}
