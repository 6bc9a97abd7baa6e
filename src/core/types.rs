//! core::types
//!
//! Strong types for name construction.
//!
//! # Types
//!
//! - [`Delimiter`] - Validated component delimiter
//! - [`Representation`] - Storage strategy of a name
//!
//! # Validation
//!
//! A delimiter is exactly one character and never the escape character.
//! Invalid delimiters cannot be represented, so a constructed name always
//! satisfies the delimiter invariant.
//!
//! # Examples
//!
//! ```
//! use namekit::core::types::Delimiter;
//!
//! let slash: Delimiter = "/".parse().unwrap();
//! assert_eq!(slash.as_char(), '/');
//!
//! assert!("".parse::<Delimiter>().is_err());
//! assert!("::".parse::<Delimiter>().is_err());
//! assert!(Delimiter::new('\\').is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::contract::{require, ContractError};
use super::escape::{DEFAULT_DELIMITER, ESCAPE_CHARACTER};

/// A validated component delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Delimiter(char);

impl Delimiter {
    /// The default delimiter, `.`.
    pub const DEFAULT: Delimiter = Delimiter(DEFAULT_DELIMITER);

    /// Create a delimiter from a single character.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::IllegalArgument` for the escape character.
    pub fn new(c: char) -> Result<Self, ContractError> {
        require(c != ESCAPE_CHARACTER, || {
            format!("delimiter must not be the escape character '{ESCAPE_CHARACTER}'")
        })?;
        Ok(Self(c))
    }

    /// Get the delimiter character.
    pub fn as_char(self) -> char {
        self.0
    }

    /// Whether this is a valid delimiter character.
    pub(crate) fn is_valid(self) -> bool {
        self.0 != ESCAPE_CHARACTER
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for Delimiter {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c),
            _ => Err(ContractError::IllegalArgument(format!(
                "delimiter must be a single character, got '{s}'"
            ))),
        }
    }
}

impl TryFrom<char> for Delimiter {
    type Error = ContractError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::new(c)
    }
}

impl TryFrom<String> for Delimiter {
    type Error = ContractError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Delimiter> for String {
    fn from(d: Delimiter) -> Self {
        d.0.to_string()
    }
}

impl From<Delimiter> for char {
    fn from(d: Delimiter) -> Self {
        d.0
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a name stores its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    /// One masked string per component.
    Components,
    /// One delimiter-joined string, tokenized on demand.
    #[default]
    Joined,
}

impl Representation {
    /// All representations, in a fixed order.
    pub const ALL: [Representation; 2] = [Representation::Components, Representation::Joined];

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Representation::Components => "components",
            Representation::Joined => "joined",
        }
    }
}

impl FromStr for Representation {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "components" | "array" => Ok(Representation::Components),
            "joined" | "string" => Ok(Representation::Joined),
            _ => Err(ContractError::IllegalArgument(format!(
                "unknown representation '{s}', must be one of: components, joined"
            ))),
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod delimiter {
        use super::*;

        #[test]
        fn default_is_dot() {
            assert_eq!(Delimiter::default().as_char(), '.');
            assert_eq!(Delimiter::DEFAULT, Delimiter::new('.').unwrap());
        }

        #[test]
        fn parses_single_character() {
            assert_eq!("/".parse::<Delimiter>().unwrap().as_char(), '/');
            assert_eq!("é".parse::<Delimiter>().unwrap().as_char(), 'é');
        }

        #[test]
        fn rejects_empty_and_multi_character() {
            assert!("".parse::<Delimiter>().unwrap_err().is_illegal_argument());
            assert!("..".parse::<Delimiter>().unwrap_err().is_illegal_argument());
        }

        #[test]
        fn rejects_escape_character() {
            assert!(Delimiter::new('\\').unwrap_err().is_illegal_argument());
            assert!("\\".parse::<Delimiter>().is_err());
        }

        #[test]
        fn serde_roundtrip() {
            let d = Delimiter::new('#').unwrap();
            let json = serde_json::to_string(&d).unwrap();
            assert_eq!(json, "\"#\"");
            let parsed: Delimiter = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, d);
        }

        #[test]
        fn serde_rejects_invalid() {
            assert!(serde_json::from_str::<Delimiter>("\"ab\"").is_err());
            assert!(serde_json::from_str::<Delimiter>("\"\\\\\"").is_err());
        }
    }

    mod representation {
        use super::*;

        #[test]
        fn parses_names_and_aliases() {
            assert_eq!(
                "components".parse::<Representation>().unwrap(),
                Representation::Components
            );
            assert_eq!(
                "string".parse::<Representation>().unwrap(),
                Representation::Joined
            );
            assert!("tree".parse::<Representation>().is_err());
        }

        #[test]
        fn display_matches_serde() {
            for r in Representation::ALL {
                let json = serde_json::to_string(&r).unwrap();
                assert_eq!(json, format!("\"{r}\""));
            }
        }
    }
}
