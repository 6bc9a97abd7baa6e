//! core::name::joined
//!
//! String-backed storage: all components in one delimiter-joined string.
//!
//! Only the component count is cached. Every component query re-runs the
//! tokenizer over the whole string.
//!
//! A name with zero components cannot be told apart from a name with one
//! empty component by looking at the string alone, so the cached count is
//! authoritative for that case: a count of zero with an empty string means
//! no components.

use crate::core::contract::{invariant, ContractError};
use crate::core::tokenizer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct JoinedStorage {
    name: String,
    no_components: usize,
}

impl JoinedStorage {
    /// Tokenize `source` once to validate it and cache the count.
    pub(super) fn parse(source: &str, delimiter: char) -> Result<Self, ContractError> {
        let no_components = tokenizer::count(source, delimiter)?;
        Ok(Self {
            name: source.to_string(),
            no_components,
        })
    }

    pub(super) fn from_components(components: &[String], delimiter: char) -> Self {
        Self {
            name: tokenizer::join(components, delimiter),
            no_components: components.len(),
        }
    }

    pub(super) fn len(&self) -> usize {
        self.no_components
    }

    #[cfg(test)]
    pub(super) fn as_str(&self) -> &str {
        &self.name
    }

    pub(super) fn get(&self, index: usize, delimiter: char) -> Result<Option<String>, ContractError> {
        Ok(self.to_vec(delimiter)?.into_iter().nth(index))
    }

    pub(super) fn to_vec(&self, delimiter: char) -> Result<Vec<String>, ContractError> {
        if self.no_components == 0 && self.name.is_empty() {
            return Ok(Vec::new());
        }
        tokenizer::split(&self.name, delimiter).map_err(|e| {
            ContractError::InvalidState(format!("stored name no longer tokenizes: {e}"))
        })
    }

    /// The cached count must match what the tokenizer sees.
    pub(super) fn check(&self, delimiter: char) -> Result<(), ContractError> {
        let actual = self.to_vec(delimiter)?.len();
        invariant(actual == self.no_components, || {
            format!(
                "cached component count {} differs from actual count {actual}",
                self.no_components
            )
        })
    }

    #[cfg(test)]
    pub(super) fn corrupt_count(&mut self, no_components: usize) {
        self.no_components = no_components;
    }
}
