//! core::config
//!
//! Configuration schema and loading for the `nk` binary.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! The library itself never reads configuration. The default delimiter of
//! [`crate::core::name::Name`] is the constant `.`.
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$NAMEKIT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/namekit/config.toml`
//! 3. `~/.namekit/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use namekit::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("Delimiter: {}", config.delimiter());
//! println!("JSON: {}", config.json());
//! ```

pub mod schema;

pub use schema::FileConfig;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::types::{Delimiter, Representation};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "NAMEKIT_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown config key: {0}")]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration with accessors that apply defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Values from the config file
    pub file: FileConfig,
    /// Path the values were read from, if any
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Otherwise the standard locations are
    /// searched and a missing file means defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let found = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find(),
        };

        let Some(path) = found else {
            return Ok(Config::default());
        };

        let file = Self::read_config(&path)?;
        file.validate()?;
        log::debug!("loaded config from {}", path.display());

        Ok(Config {
            file,
            path: Some(path),
        })
    }

    /// Find the first existing config file in the standard locations.
    fn find() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("namekit/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(".namekit/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The file this configuration was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the canonical config path.
    ///
    /// Returns `$NAMEKIT_CONFIG` if set, otherwise `~/.namekit/config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".namekit/config.toml"))
    }

    /// Set `key` to `value`, validating the result.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut file = self.file.clone();
        match key {
            "delimiter" => file.delimiter = Some(value.to_string()),
            "representation" => file.representation = Some(value.to_string()),
            "json" => {
                let json = value.parse::<bool>().map_err(|_| {
                    ConfigError::InvalidValue(format!("json must be true or false, got '{value}'"))
                })?;
                file.json = Some(json);
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        file.validate()?;
        self.file = file;
        Ok(())
    }

    /// Write the file values to `path` atomically.
    ///
    /// Creates parent directories if needed.
    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents = toml::to_string_pretty(&self.file)
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        // Write to temp file in same directory (for atomic rename)
        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// The delimiter for names read from the command line.
    ///
    /// Defaults to `.`.
    pub fn delimiter(&self) -> Delimiter {
        self.file
            .delimiter
            .as_deref()
            .and_then(|d| d.parse().ok())
            .unwrap_or_default()
    }

    /// Whether output is JSON by default.
    ///
    /// Defaults to `false`.
    pub fn json(&self) -> bool {
        self.file.json.unwrap_or(false)
    }

    /// Storage used for parsed names.
    ///
    /// Defaults to [`Representation::Joined`].
    pub fn representation(&self) -> Representation {
        self.file
            .representation
            .as_deref()
            .and_then(|r| r.parse().ok())
            .unwrap_or_default()
    }
}
