//! Configuration module for dropsearch
//!
//! Manages the API credential and tuning knobs. Configuration is stored in
//! the user's config directory and can be overridden per run with
//! `DROPSEARCH_*` environment variables (e.g. `DROPSEARCH_TOKEN`).

mod setup;

pub use setup::first_time_setup;

use crate::api::DEFAULT_API_URL;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default web app root, used to build tag page links
pub const DEFAULT_APP_URL: &str = "https://app.raindrop.io";

/// Prefix for environment overrides
const ENV_PREFIX: &str = "DROPSEARCH";

/// Keys accepted by `config get` / `config set`
pub const KEYS: &[&str] = &[
    "token",
    "api_url",
    "app_url",
    "debounce_ms",
    "timeout_secs",
    "quiet",
];

/// Bearer credential for the Raindrop.io API
///
/// Never printed: `Debug` and `Display` both render a mask.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wrap a raw token
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().trim().to_string())
    }

    /// Raw token value, for building the Authorization header only
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the token is blank
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(********)")
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("********")
    }
}

const fn default_debounce_ms() -> u64 {
    200
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_app_url() -> String {
    DEFAULT_APP_URL.to_string()
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// API test token from the Raindrop.io integrations page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<ApiToken>,

    /// REST API root
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Web app root used for tag links
    #[serde(default = "default_app_url")]
    pub app_url: String,

    /// Quiet period after the last keystroke before searching
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: default_api_url(),
            app_url: default_app_url(),
            debounce_ms: default_debounce_ms(),
            timeout_secs: default_timeout_secs(),
            quiet: false,
        }
    }
}

impl AppConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("dropsearch").join("config.toml"))
    }

    /// Load configuration from the default location plus environment overrides
    ///
    /// A missing file is not an error; defaults are used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path` plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::load_layers(path, Some(environment()))
    }

    /// Load only what is stored in the file at `path`
    ///
    /// Environment overrides are left out so that writing the result back
    /// never persists them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load_file_from(path: &Path) -> Result<Self, ConfigError> {
        Self::load_layers(path, None)
    }

    fn load_layers(path: &Path, env: Option<Environment>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(
            File::from(path.to_path_buf())
                .format(FileFormat::Toml)
                .required(false),
        );
        if let Some(env) = env {
            builder = builder.add_source(env);
        }

        builder.build()?.try_deserialize()
    }

    /// Change one stored setting in the default config file
    ///
    /// # Errors
    ///
    /// See [`update_file`](Self::update_file).
    pub fn update(key: &str, value: &str) -> Result<Self, ConfigError> {
        Self::update_file(&Self::config_path()?, key, value)
    }

    /// Change one stored setting in the file at `path` and return the stored
    /// configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for unknown keys, `ConfigError::Message`
    /// for values that do not parse, or any load/save failure.
    pub fn update_file(path: &Path, key: &str, value: &str) -> Result<Self, ConfigError> {
        let mut stored = Self::load_file_from(path)?;
        stored.set(key, value)?;
        stored.save_to(path)?;
        Ok(stored)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Load configuration, running first-time setup if no token is available
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        if config.has_token() {
            Ok(config)
        } else {
            first_time_setup(config)
        }
    }

    /// Whether a non-blank token is configured
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// The configured token
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no usable token is configured.
    pub fn require_token(&self) -> Result<&ApiToken, ConfigError> {
        self.token
            .as_ref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::NotFound("token".to_string()))
    }

    /// Debounce quiet period
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Read a setting as display text (the token is masked)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for unknown keys.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "token" => self
                .token
                .as_ref()
                .map_or_else(|| "(not set)".to_string(), ToString::to_string),
            "api_url" => self.api_url.clone(),
            "app_url" => self.app_url.clone(),
            "debounce_ms" => self.debounce_ms.to_string(),
            "timeout_secs" => self.timeout_secs.to_string(),
            "quiet" => self.quiet.to_string(),
            _ => return Err(ConfigError::NotFound(key.to_string())),
        };
        Ok(value)
    }

    /// Update a setting from its text form
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for unknown keys and
    /// `ConfigError::Message` for values that do not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "token" => self.token = Some(ApiToken::new(value)),
            "api_url" => self.api_url = value.trim_end_matches('/').to_string(),
            "app_url" => self.app_url = value.trim_end_matches('/').to_string(),
            "debounce_ms" => self.debounce_ms = parse_value(key, value)?,
            "timeout_secs" => self.timeout_secs = parse_value(key, value)?,
            "quiet" => self.quiet = parse_value(key, value)?,
            _ => return Err(ConfigError::NotFound(key.to_string())),
        }
        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).try_parsing(true)
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Message(format!("Invalid value for {key}: '{value}'")))
}
