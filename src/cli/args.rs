//! CLI argument parsing
//!
//! ```text
//! lemmatree [OPTIONS] [DOCUMENT]
//! ```

use crate::config::{Overrides, API_KEY_ENV};
use crate::render::RendererKind;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Generate a Mermaid flowchart of lemma/theorem dependencies from a LaTeX paper
#[derive(Debug, Clone, Parser)]
#[command(name = "lemmatree", version, about)]
pub struct Args {
    /// The main .tex file of the paper
    pub document: Option<PathBuf>,

    /// Gemini API key (https://aistudio.google.com/apikey)
    #[arg(short = 'k', long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name (e.g. gemini-2.0-flash, gemini-2.5-pro)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Config file (default: <config dir>/lemmatree/config.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// API base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Renderer for the generated diagram
    #[arg(short, long, value_enum)]
    pub renderer: Option<RendererKind>,

    /// Render output path (default: lemmatree.html, or lemmatree.svg for mmdc)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Diagram display height in pixels
    #[arg(long, value_name = "PX")]
    pub height: Option<u32>,

    /// Also write the normalized Mermaid code to this file
    #[arg(long, value_name = "PATH")]
    pub mermaid_out: Option<PathBuf>,

    /// Print a JSON report instead of human-readable output
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Flags that override config file values
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout,
            renderer: self.renderer,
            output: self.output.clone(),
            height: self.height,
        }
    }

    /// Default tracing filter for the verbosity level
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
