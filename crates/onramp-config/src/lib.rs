//! Configuration loading for the Onramp front end.
//!
//! Sources, in increasing priority: built-in defaults, the TOML config file
//! (platform config dir, overridable), `ONRAMP_*` environment variables
//! (double underscore separates nesting: `ONRAMP_API__BASE_URL`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine a config directory for this platform")]
    NoConfigDir,

    #[error("failed to read config: {0}")]
    Extract(#[from] figment::Error),

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Types ───────────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiSettings,
    /// Runtime feature toggles; features not listed default to enabled.
    pub flags: HashMap<String, bool>,
    pub log: LogSettings,
}

/// Where and how to reach the platform API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL; the `/api` prefix is appended by the client if missing.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            timeout_secs: 30,
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// File-logging settings for the TUI (stderr belongs to the terminal UI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log directory; `None` uses the platform data dir.
    pub directory: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            directory: None,
            filter: "info".into(),
        }
    }
}

// ── Loading / saving ────────────────────────────────────────────────

/// Path of the default config file (`<platform config dir>/config.toml`).
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dirs =
        directories::ProjectDirs::from("dev", "onramp", "onramp").ok_or(ConfigError::NoConfigDir)?;
    Ok(dirs.config_dir().join("config.toml"))
}

/// Default log directory (`<platform data dir>/logs`).
pub fn default_log_dir() -> Result<PathBuf, ConfigError> {
    let dirs =
        directories::ProjectDirs::from("dev", "onramp", "onramp").ok_or(ConfigError::NoConfigDir)?;
    Ok(dirs.data_dir().join("logs"))
}

/// Load from the default location; a missing file yields defaults.
pub fn load_config_or_default() -> Result<Config, ConfigError> {
    load_config_from(&config_path()?)
}

/// Load from an explicit file path, still honoring `ONRAMP_*` overrides.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ONRAMP_").split("__"))
        .extract()
        .map_err(ConfigError::from)
}

/// Write the config as pretty TOML, creating parent directories as needed.
pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let rendered = toml::to_string_pretty(config)?;
    std::fs::write(path, rendered).map_err(|e| ConfigError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
