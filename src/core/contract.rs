//! core::contract
//!
//! Precondition, postcondition, and invariant checks.
//!
//! # Error Kinds
//!
//! Every contract check maps to exactly one error kind:
//!
//! - [`require`] checks a precondition and fails with
//!   [`ContractError::IllegalArgument`]. The caller is at fault.
//! - [`invariant`] checks a class invariant and fails with
//!   [`ContractError::InvalidState`]. The instance is corrupt.
//! - [`ensure`] checks a postcondition and fails with
//!   [`ContractError::MethodFailed`]. The operation did not do its job.
//!
//! None of them are retried. A failing check aborts the operation before
//! any result becomes visible.
//!
//! Messages are built lazily so passing checks cost nothing beyond the
//! condition itself.

use thiserror::Error;

/// Errors raised by contract checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContractError {
    #[error("precondition not met: {0}")]
    IllegalArgument(String),

    #[error("class invariant not met: {0}")]
    InvalidState(String),

    #[error("postcondition not met: {0}")]
    MethodFailed(String),
}

impl ContractError {
    /// Whether the caller passed something invalid.
    pub fn is_illegal_argument(&self) -> bool {
        matches!(self, ContractError::IllegalArgument(_))
    }

    /// Whether an invariant was found broken.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, ContractError::InvalidState(_))
    }

    /// Whether an operation failed to establish its postcondition.
    pub fn is_method_failed(&self) -> bool {
        matches!(self, ContractError::MethodFailed(_))
    }
}

/// Check a precondition.
pub fn require(condition: bool, message: impl FnOnce() -> String) -> Result<(), ContractError> {
    check(condition, message, ContractError::IllegalArgument)
}

/// Check a class invariant.
pub fn invariant(condition: bool, message: impl FnOnce() -> String) -> Result<(), ContractError> {
    check(condition, message, ContractError::InvalidState)
}

/// Check a postcondition.
pub fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<(), ContractError> {
    check(condition, message, ContractError::MethodFailed)
}

/// Check that `index` addresses an existing element of a sequence of `len`.
pub fn require_index(index: usize, len: usize) -> Result<(), ContractError> {
    require(index < len, || {
        if len == 0 {
            format!("index {index} is out of bounds for an empty name")
        } else {
            format!("index {index} is out of bounds [0, {}]", len - 1)
        }
    })
}

/// Check that `index` is a valid insertion point in a sequence of `len`.
pub fn require_insert_index(index: usize, len: usize) -> Result<(), ContractError> {
    require(index <= len, || {
        format!("insertion index {index} is out of bounds [0, {len}]")
    })
}

fn check(
    condition: bool,
    message: impl FnOnce() -> String,
    kind: fn(String) -> ContractError,
) -> Result<(), ContractError> {
    if condition {
        return Ok(());
    }
    let error = kind(message());
    log::debug!("contract violation: {error}");
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_checks_are_ok() {
        assert!(require(true, || unreachable!()).is_ok());
        assert!(invariant(true, || unreachable!()).is_ok());
        assert!(ensure(true, || unreachable!()).is_ok());
    }

    #[test]
    fn each_check_has_its_own_kind() {
        assert!(require(false, || "x".into()).unwrap_err().is_illegal_argument());
        assert!(invariant(false, || "x".into()).unwrap_err().is_invalid_state());
        assert!(ensure(false, || "x".into()).unwrap_err().is_method_failed());
    }

    #[test]
    fn messages_name_the_failed_contract() {
        let err = ensure(false, || "length did not increase by one".into()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "postcondition not met: length did not increase by one"
        );
    }

    #[test]
    fn index_bounds() {
        assert!(require_index(0, 1).is_ok());
        assert!(require_index(1, 1).is_err());
        assert!(require_index(0, 0).is_err());
        assert!(require_insert_index(3, 3).is_ok());
        assert!(require_insert_index(4, 3).is_err());
    }
}
