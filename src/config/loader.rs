//! Configuration file loading with precedence handling.

use crate::parser::block::DEFAULT_MAX_LOOKBACK;
use crate::view_state::DEFAULT_CARD_CACHE_CAPACITY;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "DAYLINE_CONFIG";

/// Environment variable overriding the daily folder name.
pub const DAILY_FOLDER_ENV_VAR: &str = "DAYLINE_DAILY_FOLDER";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed but cannot be used.
    #[error("Invalid value for `{key}`: {reason}")]
    InvalidValue {
        /// Config key.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/dayline/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Name of the folder holding daily notes.
    #[serde(default)]
    pub daily_folder: Option<String>,

    /// `chrono` format of daily note file stems.
    #[serde(default)]
    pub date_format: Option<String>,

    /// Lines searched above the viewport for an owning header.
    #[serde(default)]
    pub lookback_lines: Option<usize>,

    /// Spaces inserted by the indent key.
    #[serde(default)]
    pub indent: Option<usize>,

    /// Number of rendered cards kept in memory.
    #[serde(default)]
    pub card_cache_capacity: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Daily folder name.
    pub daily_folder: String,
    /// Daily note date format.
    pub date_format: String,
    /// Owning-header lookback bound.
    pub lookback_lines: usize,
    /// Indent width in spaces.
    pub indent: usize,
    /// Card cache capacity.
    pub card_cache_capacity: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            daily_folder: "Daily".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            lookback_lines: DEFAULT_MAX_LOOKBACK,
            indent: 4,
            card_cache_capacity: DEFAULT_CARD_CACHE_CAPACITY,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Reject values that parse but cannot work.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidValue` for an empty daily folder, a date format
    /// without any `%` specifier, or a zero lookback.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.daily_folder.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "daily_folder",
                reason: "must not be empty".to_string(),
            });
        }
        if !self.date_format.contains('%') {
            return Err(ConfigError::InvalidValue {
                key: "date_format",
                reason: format!("`{}` has no date specifier", self.date_format),
            });
        }
        if self.lookback_lines == 0 {
            return Err(ConfigError::InvalidValue {
                key: "lookback_lines",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/dayline/dayline.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("dayline").join("dayline.log"),
        None => PathBuf::from("dayline.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/dayline/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dayline").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `DAYLINE_CONFIG` environment variable
/// 3. Default path `~/.config/dayline/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `DAYLINE_DAILY_FOLDER`: Override daily folder name
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(folder) = std::env::var(DAILY_FOLDER_ENV_VAR) {
        config.daily_folder = folder;
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        daily_folder: config.daily_folder.unwrap_or(defaults.daily_folder),
        date_format: config.date_format.unwrap_or(defaults.date_format),
        lookback_lines: config.lookback_lines.unwrap_or(defaults.lookback_lines),
        indent: config.indent.unwrap_or(defaults.indent),
        card_cache_capacity: config
            .card_cache_capacity
            .unwrap_or(defaults.card_cache_capacity),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    daily_folder_override: Option<String>,
) -> ResolvedConfig {
    if let Some(folder) = daily_folder_override {
        config.daily_folder = folder;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
