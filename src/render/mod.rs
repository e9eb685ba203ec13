//! Diagram rendering
//!
//! Renderers turn diagram text into something viewable. They never repair or
//! reinterpret the text; a failure is reported back to the presenter.

pub mod html;
pub mod mmdc;

pub use html::HtmlRenderer;
pub use mmdc::MmdcRenderer;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default display height in pixels
pub const DEFAULT_HEIGHT: u32 = 600;

/// Diagram types Mermaid recognizes from the first significant line
const DIAGRAM_KEYWORDS: &[&str] = &[
    "graph",
    "flowchart",
    "flowchart-elk",
    "sequenceDiagram",
    "classDiagram",
    "classDiagram-v2",
    "stateDiagram",
    "stateDiagram-v2",
    "erDiagram",
    "journey",
    "gantt",
    "pie",
    "quadrantChart",
    "requirementDiagram",
    "gitGraph",
    "mindmap",
    "timeline",
    "sankey-beta",
    "xychart-beta",
    "block-beta",
];

/// Which renderer to hand the diagram to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Standalone HTML page rendered by mermaid.js in the browser
    #[default]
    Html,
    /// mermaid-cli (`mmdc`) producing SVG/PNG/PDF
    Mmdc,
    /// Print the code only
    None,
}

/// Display-size hint passed to every renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderHint {
    pub height: u32,
}

impl Default for RenderHint {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Where a rendered diagram ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    pub path: PathBuf,
}

/// Render failures
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Diagram text is empty")]
    EmptyDiagram,

    #[error("No diagram type detected in first line: {first_line:?}")]
    UnknownDiagramType { first_line: String },

    #[error("Diagram syntax error: {0}")]
    Syntax(String),

    #[error("Renderer '{tool}' is not available: {reason}")]
    ToolUnavailable { tool: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render collaborator
pub trait DiagramRenderer {
    fn render(&self, diagram: &str, hint: &RenderHint) -> Result<RenderOutput, RenderError>;

    /// Get renderer name for logging
    fn name(&self) -> &str;
}

/// Detect the diagram type keyword Mermaid would dispatch on.
///
/// Skips blank lines, `%%` comments/directives and a leading `---` front
/// matter block.
pub fn detect_diagram_type(diagram: &str) -> Result<&'static str, RenderError> {
    let mut lines = diagram.lines().map(str::trim).filter(|l| !l.is_empty());
    let mut first = lines.next().ok_or(RenderError::EmptyDiagram)?;

    if first == "---" {
        first = lines
            .by_ref()
            .skip_while(|l| *l != "---")
            .nth(1)
            .ok_or(RenderError::EmptyDiagram)?;
    }
    while first.starts_with("%%") {
        first = lines.next().ok_or(RenderError::EmptyDiagram)?;
    }

    let word = first
        .split(|c: char| c.is_whitespace() || c == ';')
        .next()
        .unwrap_or_default();

    DIAGRAM_KEYWORDS
        .iter()
        .find(|k| **k == word)
        .copied()
        .ok_or_else(|| RenderError::UnknownDiagramType {
            first_line: first.to_string(),
        })
}
