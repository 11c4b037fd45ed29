//! Configuration for the `teamflow` CLI.
//!
//! Priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`--config`, or `<config dir>/teamflow/config.toml`)
//! 4. Compiled defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

/// TOML file layout; every field optional so files can override partially.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    log_level: Option<String>,
    api: ApiFileConfig,
}

/// `[api]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiFileConfig {
    base_url: Option<String>,
    token: Option<String>,
    timeout_secs: Option<u64>,
}

/// Connection and logging options shared by every command.
#[derive(clap::Args, Debug, Default)]
pub struct ConfigArgs {
    /// Task API base URL
    #[arg(long, global = true, env = "TEAMFLOW_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token for the task API
    #[arg(long, global = true, env = "TEAMFLOW_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Log level filter (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "TEAMFLOW_LOG")]
    pub log_level: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000/api".to_string(),
            token: None,
            timeout: Duration::from_secs(30),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Merge CLI args, environment, and the config file.
    ///
    /// An explicit `--config` that cannot be read is an error; a missing
    /// default config file is not.
    pub fn load(args: &ConfigArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(args.config.as_deref())?;
        Ok(Self::resolve(args, file))
    }

    fn resolve(args: &ConfigArgs, file: ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            api_url: args
                .api_url
                .clone()
                .or(file.api.base_url)
                .unwrap_or(defaults.api_url),
            token: args.token.clone().or(file.api.token),
            timeout: args
                .timeout_secs
                .or(file.api.timeout_secs)
                .map_or(defaults.timeout, Duration::from_secs),
            log_level: args
                .log_level
                .clone()
                .or(file.log_level)
                .unwrap_or(defaults.log_level),
        }
    }
}

fn load_config_file(explicit: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    if let Some(path) = explicit {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ConfigFile::default());
    };
    let path = config_dir.join("teamflow").join("config.toml");
    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(source) => Err(ConfigError::ReadFile { path, source }),
    }
}
