//! Bootstrap configuration loading
//!
//! The TOML file is the lowest explicit tier of configuration. Every field is
//! optional so a service can layer command-line flags and environment
//! variables over it and fall back to compiled defaults for anything left
//! unset.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Bootstrap configuration loaded from a TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Interface to bind the HTTP server to
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Return canned sample artifacts instead of calling the model
    #[serde(default)]
    pub use_sample_data: Option<bool>,

    /// Maximum accepted upload size in bytes
    #[serde(default)]
    pub max_upload_bytes: Option<usize>,

    /// Upstream model settings
    #[serde(default)]
    pub openrouter: OpenRouterToml,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingToml,
}

/// `[openrouter]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenRouterToml {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// `[logging]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingToml {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default)]
    pub level: Option<String>,
    /// Log file path
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Load a TOML configuration file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Read TOML failed ({}): {}", path.display(), e))
    })?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
}

/// Interpret an environment-style boolean flag
///
/// `true`, `1` and `t` (any case) enable the flag; every other value disables it.
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "t")
}
