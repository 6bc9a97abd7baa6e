//! core::name::components
//!
//! Array-backed storage: one masked string per component.
//!
//! Component access is O(1). Insertion and removal shift the tail.

use crate::core::contract::{invariant, ContractError};
use crate::core::escape::is_masked;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ComponentStorage {
    components: Vec<String>,
}

impl ComponentStorage {
    pub(super) fn new(components: Vec<String>) -> Self {
        Self { components }
    }

    pub(super) fn len(&self) -> usize {
        self.components.len()
    }

    pub(super) fn get(&self, index: usize) -> Option<String> {
        self.components.get(index).cloned()
    }

    pub(super) fn to_vec(&self) -> Vec<String> {
        self.components.clone()
    }

    /// Every stored component must be well-formed for `delimiter`.
    pub(super) fn check(&self, delimiter: char) -> Result<(), ContractError> {
        for (i, component) in self.components.iter().enumerate() {
            invariant(is_masked(component, delimiter), || {
                format!("component {i} ('{component}') is not masked for delimiter '{delimiter}'")
            })?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub(super) fn components_mut(&mut self) -> &mut Vec<String> {
        &mut self.components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_is_positional() {
        let storage = ComponentStorage::new(vec!["a".into(), "b".into()]);
        assert_eq!(storage.len(), 2);
        assert_eq!(storage.get(1).as_deref(), Some("b"));
        assert_eq!(storage.get(2), None);
    }

    #[test]
    fn check_rejects_unmasked_component() {
        let storage = ComponentStorage::new(vec!["a.b".into()]);
        assert!(storage.check('/').is_ok());
        assert!(storage.check('.').unwrap_err().is_invalid_state());
    }
}
