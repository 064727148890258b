//! Configuration resolution for zyarat-ai
//!
//! **Priority:** command-line flag → environment variable → TOML file → built-in default
//!
//! Environment variables are read through clap's `env` support, after
//! `main` has loaded any `.env` file. The resolved [`Settings`] value is
//! built once at start-up and shared read-only with every handler.

use clap::Parser;
use std::convert::Infallible;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use zyarat_common::config::{load_toml_config, parse_flag, TomlConfig};
use zyarat_common::logging::LoggingConfig;
use zyarat_common::{Error, Result};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MODEL: &str = "meta-llama/llama-4-maverick:free";
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Command-line arguments for zyarat-ai
///
/// Every option is optional so unset values fall through to the TOML file
/// and then to compiled defaults.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "zyarat-ai")]
#[command(about = "Artifact analysis service for Zyarat")]
#[command(version)]
pub struct CliArgs {
    /// TOML configuration file
    #[arg(short, long, env = "ZYARAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Interface to bind to
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// OpenRouter API key
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Multimodal model identifier
    #[arg(long, env = "OPENROUTER_MODEL")]
    pub model: Option<String>,

    /// OpenRouter API base URL
    #[arg(long, env = "OPENROUTER_BASE_URL")]
    pub base_url: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "API_TIMEOUT")]
    pub api_timeout: Option<u64>,

    /// Serve canned sample artifacts instead of calling the model
    #[arg(long, env = "USE_SAMPLE_DATA", value_parser = flag_value)]
    pub use_sample_data: Option<bool>,

    /// Log level or filter directive
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log file path (empty to log to the console only)
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Maximum accepted upload size in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: Option<usize>,
}

fn flag_value(value: &str) -> std::result::Result<bool, Infallible> {
    Ok(parse_flag(value))
}

/// Upstream model connection settings
#[derive(Debug, Clone, PartialEq)]
pub struct OpenRouterConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

/// Resolved service settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub use_sample_data: bool,
    pub max_upload_bytes: usize,
    pub openrouter: OpenRouterConfig,
    pub logging: LoggingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            use_sample_data: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            openrouter: OpenRouterConfig {
                api_key: String::new(),
                model: DEFAULT_MODEL.to_string(),
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    /// Resolve settings from parsed arguments, reading the TOML file they name
    pub fn resolve(cli: CliArgs) -> Result<Self> {
        let toml = match &cli.config {
            Some(path) => load_toml_config(path)?,
            None => TomlConfig::default(),
        };
        Self::from_sources(cli, toml)
    }

    /// Merge the configuration tiers
    pub fn from_sources(cli: CliArgs, toml: TomlConfig) -> Result<Self> {
        let defaults = Self::default();

        let timeout_secs = cli
            .api_timeout
            .or(toml.openrouter.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config("API timeout must be at least 1 second".to_string()));
        }

        let max_upload_bytes = cli
            .max_upload_bytes
            .or(toml.max_upload_bytes)
            .unwrap_or(defaults.max_upload_bytes);
        if max_upload_bytes == 0 {
            return Err(Error::Config("Maximum upload size must be positive".to_string()));
        }

        // An explicitly empty path disables the file layer
        let log_file = match cli.log_file.or(toml.logging.file) {
            Some(path) if path.as_os_str().is_empty() => None,
            Some(path) => Some(path),
            None => defaults.logging.file.clone(),
        };

        Ok(Self {
            host: cli.host.or(toml.host).unwrap_or(defaults.host),
            port: cli.port.or(toml.port).unwrap_or(defaults.port),
            use_sample_data: cli
                .use_sample_data
                .or(toml.use_sample_data)
                .unwrap_or(defaults.use_sample_data),
            max_upload_bytes,
            openrouter: OpenRouterConfig {
                api_key: cli
                    .api_key
                    .or(toml.openrouter.api_key)
                    .map(|key| key.trim().to_string())
                    .unwrap_or_default(),
                model: cli
                    .model
                    .or(toml.openrouter.model)
                    .unwrap_or(defaults.openrouter.model),
                base_url: cli
                    .base_url
                    .or(toml.openrouter.base_url)
                    .unwrap_or(defaults.openrouter.base_url),
                timeout: Duration::from_secs(timeout_secs),
            },
            logging: LoggingConfig {
                level: cli
                    .log_level
                    .or(toml.logging.level)
                    .unwrap_or(defaults.logging.level),
                file: log_file,
                ..defaults.logging
            },
        })
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn has_api_key(&self) -> bool {
        is_valid_key(&self.openrouter.api_key)
    }

    /// Log the effective configuration (never the key itself)
    pub fn log_summary(&self) {
        info!("Server configured to run on {}", self.bind_address());

        if self.use_sample_data {
            info!("Running in SAMPLE DATA MODE - no real API calls will be made");
        } else if !self.has_api_key() {
            warn!("No OpenRouter API key configured. API calls will fail.");
        } else {
            info!(
                "OpenRouter API configured with model: {} (timeout: {}s)",
                self.openrouter.model,
                self.openrouter.timeout.as_secs()
            );
        }
    }
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
