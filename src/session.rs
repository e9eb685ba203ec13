//! Session state
//!
//! Outcome of the most recent generation attempt. A session holds either a
//! diagram or an error, never both.

use crate::pipeline::PipelineError;

/// State owned by one user session
#[derive(Debug, Default)]
pub enum Session {
    /// No attempt has completed yet
    #[default]
    Idle,
    /// Last attempt produced normalized diagram text
    Ready { diagram: String },
    /// Last attempt failed
    Failed(PipelineError),
}

impl Session {
    /// Normalized diagram text from the last successful attempt
    pub fn result(&self) -> Option<&str> {
        match self {
            Session::Ready { diagram } => Some(diagram),
            _ => None,
        }
    }

    /// Human-readable description of the last failure
    pub fn error_message(&self) -> Option<String> {
        self.failure().map(ToString::to_string)
    }

    /// Typed failure of the last attempt
    pub fn failure(&self) -> Option<&PipelineError> {
        match self {
            Session::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Session::Idle)
    }
}

impl From<Result<String, PipelineError>> for Session {
    fn from(outcome: Result<String, PipelineError>) -> Self {
        match outcome {
            Ok(diagram) => Session::Ready { diagram },
            Err(err) => Session::Failed(err),
        }
    }
}
