//! HTTP Transport for generation clients
//!
//! Provides the synchronous HTTP seam between clients and the network.

pub use crate::llm::transport_fake::FakeTransport;
pub use crate::llm::transport_reqwest::ReqwestTransport;
pub use crate::llm::transport_types::{GenerationError, SyncTransport};

/// Concrete transport enum
///
/// Wraps all transport types, avoiding dyn compatibility issues.
#[derive(Debug)]
pub enum Transport {
    Real(ReqwestTransport),
    Fake(FakeTransport),
}

impl Transport {
    /// Real transport with the given timeout
    pub fn real(timeout_secs: u64) -> Result<Self, GenerationError> {
        Ok(Transport::Real(ReqwestTransport::with_timeout(timeout_secs)?))
    }

    /// Borrow the fake transport (tests inspect recorded requests)
    pub fn as_fake(&self) -> Option<&FakeTransport> {
        match self {
            Transport::Fake(t) => Some(t),
            Transport::Real(_) => None,
        }
    }
}

impl SyncTransport for Transport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, GenerationError> {
        match self {
            Transport::Real(t) => t.post_json(url, headers, body),
            Transport::Fake(t) => t.post_json(url, headers, body),
        }
    }
}

impl From<FakeTransport> for Transport {
    fn from(fake: FakeTransport) -> Self {
        Transport::Fake(fake)
    }
}
