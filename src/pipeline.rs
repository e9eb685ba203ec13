//! Generation pipeline
//!
//! collect inputs → build prompt → connect client → generate → normalize.
//! Each stage returns a `Result`; the first failure ends the attempt and
//! becomes the session error.

use crate::input::GenerationInputs;
use crate::llm::{GenerationClient, GenerationError};
use crate::normalize::normalize_response;
use crate::prompt::build_flowchart_prompt;
use crate::session::Session;
use std::str::Utf8Error;
use tracing::{debug, info, warn};

/// Failures of one generation attempt
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Missing API key: pass --api-key, set GEMINI_API_KEY, or add api_key to the config file")]
    MissingApiKey,

    #[error("Missing model name")]
    MissingModel,

    #[error("Missing document: provide the .tex file to analyze")]
    MissingDocument,

    #[error("Could not decode the .tex file. Please ensure it is UTF-8 encoded")]
    Decode(#[source] Utf8Error),

    #[error("The uploaded .tex file appears to be empty")]
    EmptyDocument,

    #[error("Failed to initialize Gemini client. Check the API key? Error: {0}")]
    ClientInit(#[source] GenerationError),

    #[error("Content generation blocked by API safety settings: {reason}")]
    Blocked { reason: String },

    #[error("Error calling Gemini API ({model}): {source}")]
    Generation {
        model: String,
        #[source]
        source: GenerationError,
    },
}

impl PipelineError {
    /// True when the attempt stopped before any external call
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PipelineError::MissingApiKey
                | PipelineError::MissingModel
                | PipelineError::MissingDocument
                | PipelineError::Decode(_)
                | PipelineError::EmptyDocument
        )
    }
}

/// Run one attempt and return the new session.
///
/// The previous session is discarded up front, whatever the outcome.
/// `connect` builds the client from the credential and is only invoked
/// once the inputs are valid.
pub fn generate_flowchart<C, F>(previous: Session, inputs: &GenerationInputs, connect: F) -> Session
where
    C: GenerationClient,
    F: FnOnce(&str) -> Result<C, GenerationError>,
{
    if !previous.is_idle() {
        debug!("clearing previous session outcome");
    }
    drop(previous);

    let session = Session::from(attempt(inputs, connect));
    if let Some(err) = session.failure() {
        warn!(error = %err, "generation attempt failed");
    }
    session
}

fn attempt<C, F>(inputs: &GenerationInputs, connect: F) -> Result<String, PipelineError>
where
    C: GenerationClient,
    F: FnOnce(&str) -> Result<C, GenerationError>,
{
    let collected = inputs.collect()?;
    if let Some(doc) = &inputs.document {
        info!(document = %doc.name, bytes = doc.bytes.len(), model = collected.model, "document collected");
    }

    let prompt = build_flowchart_prompt(collected.text);
    debug!(prompt_len = prompt.len(), "prompt built");

    let client = connect(collected.api_key).map_err(PipelineError::ClientInit)?;

    let raw = client
        .generate(collected.model, &prompt)
        .map_err(|err| match err {
            GenerationError::Blocked { reason } => PipelineError::Blocked { reason },
            source => PipelineError::Generation {
                model: collected.model.to_string(),
                source,
            },
        })?;

    let diagram = normalize_response(&raw);
    info!(
        provider = client.provider_name(),
        raw_len = raw.len(),
        diagram_len = diagram.len(),
        "diagram text received"
    );
    Ok(diagram)
}
