//! Presenter
//!
//! Shows the session outcome: the error, or the generated code followed by
//! the rendered diagram. Render failures are warnings; the code stays
//! visible for manual inspection.

use crate::render::{DiagramRenderer, RenderError, RenderHint, RenderOutput};
use crate::session::Session;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::warn;

const CAPTION: &str = "Note: the accuracy of the flowchart depends on the model's interpretation \
                       of the LaTeX structure and the explicit references in the text.";

/// What happened while presenting a session
#[derive(Debug, Default)]
pub struct Presentation {
    pub rendered: Option<RenderOutput>,
    pub render_error: Option<RenderError>,
}

/// Machine-readable summary printed by `--json`
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub mermaid: Option<&'a str>,
    pub error: Option<String>,
    pub rendered: Option<PathBuf>,
    pub render_warning: Option<String>,
}

/// Presents a session through an optional renderer
pub struct Presenter {
    renderer: Option<Box<dyn DiagramRenderer>>,
    hint: RenderHint,
}

impl Presenter {
    pub fn new(renderer: Option<Box<dyn DiagramRenderer>>, hint: RenderHint) -> Self {
        Self { renderer, hint }
    }

    /// Hand the diagram to the renderer, if any
    pub fn render(&self, session: &Session) -> Presentation {
        let (Some(diagram), Some(renderer)) = (session.result(), self.renderer.as_ref()) else {
            return Presentation::default();
        };

        match renderer.render(diagram, &self.hint) {
            Ok(output) => Presentation {
                rendered: Some(output),
                render_error: None,
            },
            Err(err) => {
                warn!(renderer = renderer.name(), error = %err, "render failed");
                Presentation {
                    rendered: None,
                    render_error: Some(err),
                }
            }
        }
    }

    /// Human-readable output: code on `out`, errors and warnings on `err`
    pub fn present<W: Write, E: Write>(
        &self,
        session: &Session,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<Presentation> {
        if let Some(message) = session.error_message() {
            writeln!(err, "Error: {}", message)?;
            return Ok(Presentation::default());
        }

        let Some(diagram) = session.result() else {
            writeln!(
                err,
                "Provide both an API key and a .tex file, then run again to generate a flowchart."
            )?;
            return Ok(Presentation::default());
        };

        writeln!(out, "Generated Mermaid code:")?;
        writeln!(out, "```mermaid")?;
        writeln!(out, "{}", diagram)?;
        writeln!(out, "```")?;

        let presentation = self.render(session);
        if let Some(output) = &presentation.rendered {
            writeln!(out, "Rendered flowchart: {}", output.path.display())?;
            writeln!(out, "{}", CAPTION)?;
        }
        if let Some(render_error) = &presentation.render_error {
            writeln!(
                err,
                "Error: could not render the Mermaid diagram. The generated code might be invalid. Error: {}",
                render_error
            )?;
            writeln!(err, "Warning: please check the generated Mermaid code above for syntax errors.")?;
        }
        Ok(presentation)
    }

    /// JSON report on `out`
    pub fn present_json<W: Write>(&self, session: &Session, out: &mut W) -> io::Result<Presentation> {
        let presentation = self.render(session);
        let report = Report {
            mermaid: session.result(),
            error: session.error_message(),
            rendered: presentation.rendered.as_ref().map(|o| o.path.clone()),
            render_warning: presentation.render_error.as_ref().map(ToString::to_string),
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        Ok(presentation)
    }
}
