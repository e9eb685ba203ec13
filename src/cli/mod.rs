//! CLI module
//!
//! Provides:
//! - Argument parsing (clap)
//! - Settings resolution from flags, environment and config file
//! - The single "generate" dispatch and its exit codes

pub mod args;
pub mod dispatch;

// Re-exports
pub use args::Args;
pub use dispatch::{run_cli, ExitCode};

use crate::config::ConfigError;
use std::path::PathBuf;

/// CLI errors raised before the pipeline runs
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read document {path}: {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_SETUP_ERROR: i32 = 2;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
