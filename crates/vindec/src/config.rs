//! Configuration management for vindec.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "vindec";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "VINDEC_";

/// Output formats the CLI can render.
const OUTPUT_FORMATS: &[&str] = &["plain", "table", "json"];

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `VINDEC_`, sections separated by
///    `__`, e.g. `VINDEC_OUTPUT__FORMAT=json`)
/// 2. TOML config file at `~/.config/vindec/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,
    /// Decode configuration.
    pub decode: DecodeConfig,
    /// Batch decoding configuration.
    pub batch: BatchConfig,
    /// Fleet auto-fill configuration.
    pub fill: FillConfig,
}

/// Output-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format: `plain`, `table` or `json`.
    pub format: String,
}

/// Decode-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Report whether position 9 matches the computed check digit.
    /// Never changes whether a VIN counts as valid.
    pub report_check_digit: bool,
}

/// Batch decoding configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Leave malformed VINs out of batch output.
    pub skip_invalid: bool,
}

/// Fleet auto-fill configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// Pretty-print the rewritten fleet JSON.
    pub pretty: bool,
    /// Refuse to fill a fleet that lists the same VIN twice.
    pub reject_duplicates: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "plain".to_string(),
        }
    }
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            reject_duplicates: true,
        }
    }
}

impl Config {
    /// Load configuration from all sources, reading `config_path` or the
    /// default config file.
    ///
    /// A missing config file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let format = self.output.format.to_ascii_lowercase();
        if !OUTPUT_FORMATS.contains(&format.as_str()) {
            return Err(Error::config_validation(format!(
                "unknown output format '{}' (expected one of: {})",
                self.output.format,
                OUTPUT_FORMATS.join(", ")
            )));
        }

        Ok(())
    }
}
