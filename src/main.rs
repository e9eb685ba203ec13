//! LemmaTree CLI
//!
//! One invocation is one generation attempt:
//! read .tex → prompt Gemini → normalize → print code → render.

use clap::Parser;
use lemmatree::cli::{run_cli, Args};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level())?;

    let exit_code = run_cli(args);
    std::process::exit(exit_code);
}

/// Logs go to stderr; `RUST_LOG` overrides the `-v` level
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("lemmatree={}", default_level)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))
}
