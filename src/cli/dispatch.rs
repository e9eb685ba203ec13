//! CLI dispatch
//!
//! Resolves settings, reads the document, runs one generation attempt and
//! presents the outcome.

use crate::cli::{Args, Error, Result, EXIT_FAILURE, EXIT_SETUP_ERROR, EXIT_SUCCESS};
use crate::config::{FileConfig, Settings};
use crate::input::{Document, GenerationInputs};
use crate::llm::GeminiClient;
use crate::pipeline::generate_flowchart;
use crate::present::Presenter;
use crate::render::{html, DiagramRenderer, HtmlRenderer, MmdcRenderer, RendererKind};
use crate::session::Session;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Exit code wrapper for CLI operations
pub type ExitCode = i32;

/// Default mmdc output file
const DEFAULT_MMDC_OUTPUT: &str = "lemmatree.svg";

/// Run the CLI and return the process exit code
pub fn run_cli(args: Args) -> ExitCode {
    match run(&args) {
        Ok(session) if session.failure().is_some() => EXIT_FAILURE,
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_SETUP_ERROR
        }
    }
}

fn run(args: &Args) -> Result<Session> {
    let file = FileConfig::discover(args.config.as_deref())?;
    let settings = Settings::resolve(file, args.overrides());
    info!(model = %settings.model, renderer = ?settings.renderer, "settings resolved");

    let document = args.document.as_deref().map(read_document).transpose()?;
    let title = document.as_ref().map(|d| d.name.clone());

    let inputs = GenerationInputs::new(settings.api_key.clone(), Some(settings.model.clone()), document);
    let session = generate_flowchart(Session::Idle, &inputs, |api_key| {
        GeminiClient::new(api_key, &settings.base_url, settings.timeout_secs)
    });

    let presenter = Presenter::new(build_renderer(&settings, title), settings.hint);
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    if args.json {
        presenter.present_json(&session, &mut stdout.lock())?;
    } else {
        presenter.present(&session, &mut stdout.lock(), &mut stderr.lock())?;
    }

    // Written after presenting so a failed write never hides the diagram
    if let (Some(path), Some(diagram)) = (&args.mermaid_out, session.result()) {
        write_mermaid(path, diagram)?;
    }

    Ok(session)
}

fn read_document(path: &Path) -> Result<Document> {
    let document = Document::read(path).map_err(|source| Error::ReadDocument {
        path: path.to_path_buf(),
        source,
    })?;
    if !document.has_tex_extension() {
        warn!(document = %document.name, "document does not have a .tex extension");
    }
    Ok(document)
}

fn write_mermaid(path: &Path, diagram: &str) -> Result<()> {
    let mut contents = diagram.to_string();
    contents.push('\n');
    std::fs::write(path, contents).map_err(|source| Error::WriteOutput {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "mermaid code written");
    Ok(())
}

/// Renderer for the resolved settings; `None` when rendering is disabled
pub fn build_renderer(settings: &Settings, title: Option<String>) -> Option<Box<dyn DiagramRenderer>> {
    match settings.renderer {
        RendererKind::Html => {
            let output = settings
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(html::DEFAULT_OUTPUT));
            let renderer = HtmlRenderer::new(output);
            let renderer = match title {
                Some(title) => renderer.with_title(format!("Lemma dependencies: {}", title)),
                None => renderer,
            };
            Some(Box::new(renderer))
        }
        RendererKind::Mmdc => {
            let output = settings
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MMDC_OUTPUT));
            Some(Box::new(MmdcRenderer::new(settings.mmdc_path.clone(), output)))
        }
        RendererKind::None => None,
    }
}
