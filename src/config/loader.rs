use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{Config, Targets};

/// Fixed location of the optional config file, unless overridden at build time.
pub const DEFAULT_CONFIG_PATH: &str = match option_env!("FFROUTE_CONFIG_PATH") {
    Some(path) => path,
    None => "/etc/ffroute/config.toml",
};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Fixed per build; no runtime environment is consulted so that the
    /// target binaries stay a deployment-time decision.
    pub fn config_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_PATH)
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Any other read failure (e.g. permission denied) is an error.
    /// - If the file exists, parses it as TOML and validates.
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using built-in targets");
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Both target paths must be non-empty and absolute. A relative path
    /// would be resolved against `PATH`, which could pick up ffroute itself.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, path) in [("local", &self.targets.local), ("remote", &self.targets.remote)] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: format!("targets.{} must not be empty", key),
                });
            }
            if !path.is_absolute() {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "targets.{} must be an absolute path, got '{}'",
                        key,
                        path.display()
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    pub fn into_targets(self) -> Targets {
        self.targets
    }
}
