//! Generation clients
//!
//! Provider interface for remote text-generation APIs.
//! Gemini is the production provider; `StubClient` serves tests.

pub mod gemini;
pub mod gemini_parse;
pub mod stub;
pub mod transport;
pub mod transport_fake;
pub mod transport_reqwest;
pub mod transport_types;

// Re-export common types
pub use gemini::GeminiClient;
pub use stub::StubClient;
pub use transport::Transport;
pub use transport_types::{GenerationError, SyncTransport};

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Text-generation client
///
/// One blocking call per invocation; implementations never retry.
pub trait GenerationClient {
    /// Send `prompt` to `model` and return the response text unmodified.
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError>;

    /// Get provider name for logging
    fn provider_name(&self) -> &str;
}

// Pipelines take the client by value; a borrowed client keeps its state
// visible to the caller that owns it.
impl<C: GenerationClient + ?Sized> GenerationClient for &C {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate(model, prompt)
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}
