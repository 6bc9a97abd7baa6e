//! core::escape
//!
//! Masking of delimiter and escape characters inside name components.
//!
//! # Masking Algebra
//!
//! A component is stored *masked*: every literal escape character is doubled,
//! then every literal delimiter is prefixed with one escape character.
//! Unmasking runs the two steps in the opposite order. Running them in any
//! other order breaks components where a literal escape character is
//! immediately followed by a literal delimiter.
//!
//! # Example
//!
//! ```
//! use namekit::core::escape::{mask, unmask};
//!
//! assert_eq!(mask("a.b", '.'), "a\\.b");
//! assert_eq!(unmask("a\\.b", '.'), "a.b");
//! assert_eq!(unmask(&mask("x\\.y", '.'), '.'), "x\\.y");
//! ```

/// The fixed escape character. Not configurable.
pub const ESCAPE_CHARACTER: char = '\\';

/// The delimiter used when none is given, and for data strings.
pub const DEFAULT_DELIMITER: char = '.';

/// Mask a literal component for storage under `delimiter`.
pub fn mask(raw: &str, delimiter: char) -> String {
    let escape = ESCAPE_CHARACTER.to_string();
    let doubled = raw.replace(&escape, &format!("{escape}{escape}"));
    doubled.replace(delimiter, &format!("{escape}{delimiter}"))
}

/// Restore the literal text of a component masked under `delimiter`.
pub fn unmask(stored: &str, delimiter: char) -> String {
    let escape = ESCAPE_CHARACTER.to_string();
    let delimiters = stored.replace(&format!("{escape}{delimiter}"), &delimiter.to_string());
    delimiters.replace(&format!("{escape}{escape}"), &escape)
}

/// Re-mask a stored component from one delimiter to another.
pub fn remask(stored: &str, from: char, to: char) -> String {
    if from == to {
        return stored.to_string();
    }
    mask(&unmask(stored, from), to)
}

/// Check that `component` is a well-formed masked component for `delimiter`.
///
/// A masked component never contains a bare delimiter, and every escape
/// character has a follower that it escapes.
pub fn is_masked(component: &str, delimiter: char) -> bool {
    let mut chars = component.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE_CHARACTER {
            if chars.next().is_none() {
                return false;
            }
        } else if c == delimiter {
            return false;
        }
    }
    true
}
