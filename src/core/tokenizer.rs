//! core::tokenizer
//!
//! Splits a flat name string into masked components.
//!
//! # Rules
//!
//! - An escape character and its follower are copied as one unit, so an
//!   escaped delimiter never separates components.
//! - An unescaped delimiter closes the current component.
//! - The empty string yields exactly one empty component.
//! - A trailing escape character with no follower is rejected.

use super::contract::{require, ContractError};
use super::escape::ESCAPE_CHARACTER;

/// Split `source` into masked components at unescaped `delimiter`s.
///
/// # Errors
///
/// Returns `ContractError::IllegalArgument` if `source` ends in an escape
/// character that escapes nothing.
///
/// # Example
///
/// ```
/// use namekit::core::tokenizer::split;
///
/// let parts = split("a\\.b.c", '.').unwrap();
/// assert_eq!(parts, vec!["a\\.b".to_string(), "c".to_string()]);
///
/// assert_eq!(split("", '.').unwrap(), vec![String::new()]);
/// ```
pub fn split(source: &str, delimiter: char) -> Result<Vec<String>, ContractError> {
    let mut components = Vec::new();
    let mut current = String::new();
    let mut chars = source.chars();

    while let Some(c) = chars.next() {
        if c == ESCAPE_CHARACTER {
            let follower = chars.next();
            require(follower.is_some(), || {
                format!("name '{source}' ends with an unmatched escape character")
            })?;
            current.push(c);
            current.extend(follower);
        } else if c == delimiter {
            components.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    components.push(current);

    Ok(components)
}

/// Join masked components with `delimiter`.
pub fn join<S: AsRef<str>>(components: &[S], delimiter: char) -> String {
    let mut out = String::new();
    for (i, component) in components.iter().enumerate() {
        if i > 0 {
            out.push(delimiter);
        }
        out.push_str(component.as_ref());
    }
    out
}

/// Count the components of `source` without collecting them.
pub fn count(source: &str, delimiter: char) -> Result<usize, ContractError> {
    split(source, delimiter).map(|components| components.len())
}
