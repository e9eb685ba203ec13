//! LemmaTree: lemma/theorem dependency flowcharts for LaTeX papers
//!
//! The paper is sent to Gemini with a fixed prompt; the reply is Mermaid
//! flowchart code, which is normalized and handed to a renderer. All
//! understanding of the paper happens in the model.

pub mod cli;
pub mod config;
pub mod input;
pub mod llm;
pub mod normalize;
pub mod pipeline;
pub mod present;
pub mod prompt;
pub mod render;
pub mod session;

// Re-export the pipeline surface
pub use input::{Document, GenerationInputs};
pub use llm::{GeminiClient, GenerationClient, GenerationError};
pub use normalize::normalize_response;
pub use pipeline::{generate_flowchart, PipelineError};
pub use prompt::build_flowchart_prompt;
pub use session::Session;
