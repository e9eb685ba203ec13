//! mermaid-cli renderer
//!
//! Runs `mmdc` in a subprocess. The output format follows the output file
//! extension (svg, png or pdf).

use crate::render::{DiagramRenderer, RenderError, RenderHint, RenderOutput};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::Command;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Default mermaid-cli executable
pub const DEFAULT_PROGRAM: &str = "mmdc";

/// Renderer backed by mermaid-cli
#[derive(Debug, Clone)]
pub struct MmdcRenderer {
    program: PathBuf,
    output: PathBuf,
}

impl MmdcRenderer {
    pub fn new(program: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            output: output.into(),
        }
    }
}

/// Scratch input file; mmdc only reads diagrams from disk or stdin.
/// Created exclusively under a random name and removed on drop.
fn write_input(diagram: &str) -> Result<NamedTempFile, RenderError> {
    let mut input = tempfile::Builder::new()
        .prefix("lemmatree-")
        .suffix(".mmd")
        .tempfile()?;
    input.write_all(diagram.as_bytes())?;
    input.flush()?;
    Ok(input)
}

impl DiagramRenderer for MmdcRenderer {
    fn render(&self, diagram: &str, hint: &RenderHint) -> Result<RenderOutput, RenderError> {
        if diagram.trim().is_empty() {
            return Err(RenderError::EmptyDiagram);
        }

        let input = write_input(diagram)?;

        let mut cmd = Command::new(&self.program);
        cmd.arg("-i")
            .arg(input.path())
            .arg("-o")
            .arg(&self.output)
            .arg("-H")
            .arg(hint.height.to_string());
        debug!(program = %self.program.display(), output = %self.output.display(), "running mermaid-cli");

        let result = cmd.output();
        let scratch = input.path().to_path_buf();
        if let Err(e) = input.close() {
            warn!(path = %scratch.display(), error = %e, "failed to remove mermaid-cli input file");
        }

        let output = result.map_err(|e| match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => RenderError::ToolUnavailable {
                tool: self.program.display().to_string(),
                reason: e.to_string(),
            },
            _ => RenderError::Io(e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                format!("mmdc exited with {}", output.status)
            } else {
                stderr
            };
            return Err(RenderError::Syntax(detail));
        }

        Ok(RenderOutput {
            path: self.output.clone(),
        })
    }

    fn name(&self) -> &str {
        "mmdc"
    }
}
