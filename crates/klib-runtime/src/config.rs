// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime configuration: TOML file, environment overrides, validation.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::DeployEnv;

/// Errors that can occur while loading configuration or installing the
/// runtime.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested configuration file could not be read.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
    },

    /// The file could not be parsed as valid TOML.
    #[error("failed to parse config: {reason}")]
    ParseError {
        /// Human-readable parse error detail.
        reason: String,
    },

    /// Semantic validation failed (one or more problems).
    #[error("config validation failed: {reasons:?}")]
    ValidationError {
        /// Individual validation failure messages.
        reasons: Vec<String>,
    },

    /// A deployment environment name was not recognised.
    #[error("unknown deploy environment: {value}")]
    InvalidDeployEnv {
        /// The rejected value.
        value: String,
    },

    /// [`crate::Runtime::install`] was called more than once.
    #[error("runtime is already installed")]
    AlreadyInstalled,
}

/// Process-level settings, read once at startup.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Where the process is deployed.
    #[serde(default)]
    pub deploy_env: DeployEnv,

    /// Log level or `EnvFilter` directive (e.g. `"debug"`,
    /// `"klib=trace"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Build description. Overrides the compile-time value when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_info: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            deploy_env: DeployEnv::default(),
            log_level: Some("info".into()),
            build_info: None,
        }
    }
}

/// Recognised bare log levels.
const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace", "off"];

/// Environment variable overriding [`RuntimeConfig::deploy_env`].
pub const ENV_DEPLOY_ENV: &str = "KLIB_DEPLOY_ENV";
/// Environment variable overriding [`RuntimeConfig::log_level`].
pub const ENV_LOG_LEVEL: &str = "KLIB_LOG_LEVEL";
/// Environment variable overriding [`RuntimeConfig::build_info`].
pub const ENV_BUILD_INFO: &str = "KLIB_BUILD_INFO";

/// Load a [`RuntimeConfig`] from an optional TOML file path.
///
/// * If `path` is `Some`, reads and parses the file.
/// * If `path` is `None`, returns [`RuntimeConfig::default()`].
///
/// Environment variable overrides are applied on top in both cases.
///
/// # Errors
///
/// Returns [`ConfigError::FileNotFound`], [`ConfigError::ParseError`], or
/// [`ConfigError::InvalidDeployEnv`].
pub fn load_config(path: Option<&Path>) -> Result<RuntimeConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|_| ConfigError::FileNotFound {
                path: p.display().to_string(),
            })?;
            parse_toml(&content)?
        }
        None => RuntimeConfig::default(),
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Parse a TOML string into a [`RuntimeConfig`].
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] on malformed TOML or unknown
/// environment names.
pub fn parse_toml(content: &str) -> Result<RuntimeConfig, ConfigError> {
    toml::from_str::<RuntimeConfig>(content).map_err(|e| ConfigError::ParseError {
        reason: e.to_string(),
    })
}

/// Apply overrides from the process environment.
///
/// Recognised variables:
/// - `KLIB_DEPLOY_ENV`
/// - `KLIB_LOG_LEVEL`
/// - `KLIB_BUILD_INFO`
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDeployEnv`] if `KLIB_DEPLOY_ENV` is not a
/// known environment name.
pub fn apply_env_overrides(config: &mut RuntimeConfig) -> Result<(), ConfigError> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from an arbitrary key lookup.
///
/// # Errors
///
/// Same as [`apply_env_overrides`].
pub fn apply_overrides(
    config: &mut RuntimeConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(val) = lookup(ENV_DEPLOY_ENV) {
        config.deploy_env = val.parse()?;
    }
    if let Some(val) = lookup(ENV_LOG_LEVEL) {
        config.log_level = Some(val);
    }
    if let Some(val) = lookup(ENV_BUILD_INFO) {
        config.build_info = Some(val);
    }
    Ok(())
}

/// Validate a parsed configuration.
///
/// A log level is either one of the bare levels or an `EnvFilter`
/// directive list (anything containing `=` or `,`).
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] listing every problem found.
pub fn validate_config(config: &RuntimeConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    if let Some(ref level) = config.log_level {
        let is_directive = level.contains('=') || level.contains(',');
        if level.trim().is_empty() {
            errors.push("log_level must not be empty".into());
        } else if !is_directive && !VALID_LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            errors.push(format!("invalid log_level '{level}'"));
        }
    }

    if config.build_info.as_deref().is_some_and(|info| info.contains('\n')) {
        errors.push("build_info must be a single line".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError { reasons: errors })
    }
}
