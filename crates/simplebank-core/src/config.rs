//! Configuration resolution for `simplebank`.
//!
//! Implements hierarchical config resolution:
//! 1. Built-in defaults
//! 2. JSON config file (optional)
//! 3. Environment variables
//! 4. CLI arguments (highest priority, applied by the binary)

use std::fmt;
use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use simplebank_token::{MIN_SECRET_KEY_SIZE, Maker, TokenScheme, new_maker};
use tracing::warn;

use crate::error::{Error, Result};

pub const ENV_TOKEN_SCHEME: &str = "SIMPLEBANK_TOKEN_SCHEME";
pub const ENV_TOKEN_SYMMETRIC_KEY: &str = "SIMPLEBANK_TOKEN_SYMMETRIC_KEY";
pub const ENV_ACCESS_TOKEN_DURATION: &str = "SIMPLEBANK_ACCESS_TOKEN_DURATION";
pub const ENV_LOG_LEVEL: &str = "SIMPLEBANK_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "SIMPLEBANK_LOG_JSON";

/// Complete `simplebank` configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub token: TokenConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Token issuing configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    pub scheme: TokenScheme,
    /// Shared secret; at least 32 bytes.
    pub symmetric_key: String,
    /// Lifetime of access tokens (seconds).
    pub access_token_duration_secs: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            scheme: TokenScheme::default(),
            symmetric_key: String::new(),
            access_token_duration_secs: 15 * 60, // 15 minutes
        }
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("scheme", &self.scheme)
            .field("symmetric_key", &"[REDACTED]")
            .field(
                "access_token_duration_secs",
                &self.access_token_duration_secs,
            )
            .finish()
    }
}

impl TokenConfig {
    pub fn access_token_duration(&self) -> Result<Duration> {
        Duration::try_seconds(self.access_token_duration_secs).ok_or_else(|| {
            Error::Config(format!(
                "access token duration out of range: {}s",
                self.access_token_duration_secs
            ))
        })
    }

    /// Build the configured token maker.
    pub fn build_maker(&self) -> Result<Box<dyn Maker>> {
        Ok(new_maker(self.scheme, &self.symmetric_key)?)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Config {
    /// Check the settings a token maker cannot run without.
    pub fn validate(&self) -> Result<()> {
        let key_len = self.token.symmetric_key.len();
        if key_len < MIN_SECRET_KEY_SIZE {
            return Err(Error::Config(format!(
                "{ENV_TOKEN_SYMMETRIC_KEY} must be at least {MIN_SECRET_KEY_SIZE} bytes, got {key_len}"
            )));
        }
        if self.token.access_token_duration_secs <= 0 {
            return Err(Error::Config(format!(
                "access token duration must be positive, got {}s",
                self.token.access_token_duration_secs
            )));
        }
        self.token.access_token_duration()?;
        Ok(())
    }
}

/// Load configuration with hierarchical resolution.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => load_config_file(path)?,
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    Ok(config)
}

fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Apply environment overrides read through `lookup`.
///
/// Unparseable values are ignored with a warning.
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup(ENV_TOKEN_SCHEME) {
        match val.parse() {
            Ok(scheme) => config.token.scheme = scheme,
            Err(e) => warn!(var = ENV_TOKEN_SCHEME, error = %e, "Ignoring invalid value"),
        }
    }
    if let Some(val) = lookup(ENV_TOKEN_SYMMETRIC_KEY) {
        config.token.symmetric_key = val;
    }
    if let Some(val) = lookup(ENV_ACCESS_TOKEN_DURATION) {
        match val.trim().parse() {
            Ok(secs) => config.token.access_token_duration_secs = secs,
            Err(e) => warn!(var = ENV_ACCESS_TOKEN_DURATION, error = %e, "Ignoring invalid value"),
        }
    }
    if let Some(val) = lookup(ENV_LOG_LEVEL) {
        config.log.level = val;
    }
    if let Some(val) = lookup(ENV_LOG_JSON) {
        match val.trim().parse() {
            Ok(json) => config.log.json = json,
            Err(e) => warn!(var = ENV_LOG_JSON, error = %e, "Ignoring invalid value"),
        }
    }
}
