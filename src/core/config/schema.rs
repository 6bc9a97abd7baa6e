//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Values are validated after parsing: the delimiter must be a valid
//! [`Delimiter`] and the representation one of the known storage kinds.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::{Delimiter, Representation};

/// Settings read from the config file.
///
/// # Example
///
/// ```toml
/// delimiter = "/"
/// json = false
/// representation = "components"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Delimiter used to parse names given on the command line
    pub delimiter: Option<String>,

    /// Emit JSON instead of plain text
    pub json: Option<bool>,

    /// Storage used for parsed names
    pub representation: Option<String>,
}

impl FileConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(delimiter) = &self.delimiter {
            delimiter
                .parse::<Delimiter>()
                .map_err(|e| ConfigError::InvalidValue(format!("invalid delimiter: {e}")))?;
        }

        if let Some(representation) = &self.representation {
            representation
                .parse::<Representation>()
                .map_err(|e| ConfigError::InvalidValue(format!("invalid representation: {e}")))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn parses_all_keys() {
        let config: FileConfig = toml::from_str(
            r#"
            delimiter = "/"
            json = true
            representation = "components"
            "#,
        )
        .unwrap();
        assert_eq!(config.delimiter.as_deref(), Some("/"));
        assert_eq!(config.json, Some(true));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_keys() {
        let parsed: Result<FileConfig, _> = toml::from_str("escape = \"#\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn rejects_bad_delimiter() {
        let config = FileConfig {
            delimiter: Some("::".into()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn rejects_bad_representation() {
        let config = FileConfig {
            representation: Some("tree".into()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
