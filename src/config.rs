//! Configuration
//!
//! Optional TOML file plus environment and command-line overrides.
//!
//! Precedence: CLI flag > environment > config file > built-in default.

use crate::llm::gemini::DEFAULT_BASE_URL;
use crate::llm::transport_reqwest::DEFAULT_TIMEOUT_SECS;
use crate::llm::DEFAULT_MODEL;
use crate::render::{RenderHint, RendererKind, DEFAULT_HEIGHT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Config file name inside the per-user config directory
const CONFIG_DIR_NAME: &str = "lemmatree";
const CONFIG_FILE: &str = "config.toml";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of `config.toml`; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Literal key or `env:VAR` reference
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub render: RenderSection,
}

/// `[render]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSection {
    pub renderer: Option<RendererKind>,
    pub output: Option<PathBuf>,
    pub height: Option<u32>,
    pub mmdc_path: Option<PathBuf>,
}

impl FileConfig {
    /// Parse config from a TOML string
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load an explicitly requested config file; it must exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        Self::from_toml(&content, path)
    }

    /// Load the explicit file, or the per-user default if it exists
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// `<config_dir>/lemmatree/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE))
}

/// Resolve an `env:VAR` reference.
///
/// Plain values are returned as-is; an unset variable resolves to `None`.
pub fn resolve_env_var(value: &str) -> Option<String> {
    match value.strip_prefix("env:") {
        Some(var) => std::env::var(var.trim()).ok(),
        None => Some(value.to_string()),
    }
}

/// Values supplied on the command line (and `GEMINI_API_KEY` via clap)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub renderer: Option<RendererKind>,
    pub output: Option<PathBuf>,
    pub height: Option<u32>,
}

/// Effective settings for one run
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub renderer: RendererKind,
    /// Explicit render output; renderers pick their own default otherwise
    pub output: Option<PathBuf>,
    pub hint: RenderHint,
    pub mmdc_path: PathBuf,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("renderer", &self.renderer)
            .field("output", &self.output)
            .field("hint", &self.hint)
            .field("mmdc_path", &self.mmdc_path)
            .finish()
    }
}

impl Settings {
    /// Merge overrides on top of the file config and defaults
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        let api_key = overrides
            .api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| file.api_key.as_deref().and_then(resolve_env_var))
            .filter(|k| !k.trim().is_empty());

        Self {
            api_key,
            model: overrides
                .model
                .or(file.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: overrides
                .base_url
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs: overrides
                .timeout_secs
                .or(file.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            renderer: overrides
                .renderer
                .or(file.render.renderer)
                .unwrap_or_default(),
            output: overrides.output.or(file.render.output),
            hint: RenderHint {
                height: overrides
                    .height
                    .or(file.render.height)
                    .unwrap_or(DEFAULT_HEIGHT),
            },
            mmdc_path: file
                .render
                .mmdc_path
                .unwrap_or_else(|| PathBuf::from(crate::render::mmdc::DEFAULT_PROGRAM)),
        }
    }
}
