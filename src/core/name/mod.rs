//! core::name
//!
//! Hierarchical, delimiter-separated names.
//!
//! # Overview
//!
//! A [`Name`] is a delimiter plus an ordered sequence of masked components.
//! `"oss.cs.fau.de"` is a name with four components and the delimiter `.`;
//! `"///"` is a name with four empty components and the delimiter `/`.
//!
//! # Representations
//!
//! A name stores its components in one of two ways, chosen at construction:
//!
//! - [`Representation::Components`] - one masked string per component
//! - [`Representation::Joined`] - one delimiter-joined string
//!
//! Both behave identically. Names with equal content compare equal, hash
//! equal, and render identically whatever their representation.
//!
//! # Value Semantics
//!
//! Structural operations (`set_component`, `insert`, `append`, `remove`,
//! `concat`) never modify the receiver. They return a new name with its
//! own storage.
//!
//! # Contracts
//!
//! Every operation checks the class invariant on entry and exit, its
//! preconditions before doing any work, and its postconditions before
//! returning. See [`crate::core::contract`] for the error kinds.
//!
//! # Example
//!
//! ```
//! use namekit::core::name::Name;
//! use namekit::core::types::Delimiter;
//!
//! let host = Name::parse("oss.cs.fau.de", Delimiter::DEFAULT).unwrap();
//! assert_eq!(host.no_components(), 4);
//! assert_eq!(host.component(0).unwrap(), "oss");
//!
//! let longer = host.append("www").unwrap();
//! assert_eq!(host.no_components(), 4);
//! assert_eq!(longer.as_data_string().unwrap(), "oss.cs.fau.de.www");
//!
//! let same = Name::from_components(["oss", "cs", "fau", "de"], Delimiter::DEFAULT).unwrap();
//! assert_eq!(host, same);
//! assert_eq!(host.hash_code().unwrap(), same.hash_code().unwrap());
//! ```

mod components;
mod joined;

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use self::components::ComponentStorage;
use self::joined::JoinedStorage;
use super::contract::{
    ensure, invariant, require, require_index, require_insert_index, ContractError,
};
use super::escape::{self, DEFAULT_DELIMITER};
use super::types::{Delimiter, Representation};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Storage {
    Components(ComponentStorage),
    Joined(JoinedStorage),
}

impl Storage {
    fn build(kind: Representation, components: &[String], delimiter: char) -> Self {
        match kind {
            Representation::Components => {
                Storage::Components(ComponentStorage::new(components.to_vec()))
            }
            Representation::Joined => {
                Storage::Joined(JoinedStorage::from_components(components, delimiter))
            }
        }
    }

    fn kind(&self) -> Representation {
        match self {
            Storage::Components(_) => Representation::Components,
            Storage::Joined(_) => Representation::Joined,
        }
    }

    fn len(&self) -> usize {
        match self {
            Storage::Components(s) => s.len(),
            Storage::Joined(s) => s.len(),
        }
    }

    fn get(&self, index: usize, delimiter: char) -> Result<Option<String>, ContractError> {
        match self {
            Storage::Components(s) => Ok(s.get(index)),
            Storage::Joined(s) => s.get(index, delimiter),
        }
    }

    fn to_vec(&self, delimiter: char) -> Result<Vec<String>, ContractError> {
        match self {
            Storage::Components(s) => Ok(s.to_vec()),
            Storage::Joined(s) => s.to_vec(delimiter),
        }
    }

    fn check(&self, delimiter: char) -> Result<(), ContractError> {
        match self {
            Storage::Components(s) => s.check(delimiter),
            Storage::Joined(s) => s.check(delimiter),
        }
    }
}

/// A delimiter-separated name.
///
/// Construct with [`Name::parse`], [`Name::from_components`], or
/// [`Name::from_literals`].
#[derive(Debug, Clone)]
pub struct Name {
    delimiter: Delimiter,
    storage: Storage,
}

impl Name {
    /// Parse a flat string into a string-backed name.
    ///
    /// `source` is taken as already masked: escaped delimiters stay inside
    /// their component. The empty string yields one empty component.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::IllegalArgument` if `source` ends with an
    /// escape character that escapes nothing.
    pub fn parse(source: &str, delimiter: Delimiter) -> Result<Self, ContractError> {
        let storage = JoinedStorage::parse(source, delimiter.as_char())?;
        let name = Self {
            delimiter,
            storage: Storage::Joined(storage),
        };

        ensure(name.no_components() >= 1, || {
            "a parsed name has at least one component".into()
        })?;
        name.check_invariant()?;
        Ok(name)
    }

    /// Build an array-backed name from already-masked components.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::IllegalArgument` if a component contains a
    /// bare delimiter or ends with an unmatched escape character.
    pub fn from_components<I, S>(components: I, delimiter: Delimiter) -> Result<Self, ContractError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let components: Vec<String> = components.into_iter().map(Into::into).collect();
        for component in &components {
            check_component(component, delimiter)?;
        }

        let expected = components.len();
        let name = Self {
            delimiter,
            storage: Storage::Components(ComponentStorage::new(components)),
        };

        ensure(name.no_components() == expected, || {
            "component count changed during construction".into()
        })?;
        name.check_invariant()?;
        Ok(name)
    }

    /// Build an array-backed name from literal, unmasked text.
    ///
    /// Each component is masked for `delimiter` first, so any text is
    /// accepted.
    ///
    /// ```
    /// use namekit::core::name::Name;
    /// use namekit::core::types::Delimiter;
    ///
    /// let name = Name::from_literals(["v1.2", "notes"], Delimiter::DEFAULT).unwrap();
    /// assert_eq!(name.component(0).unwrap(), "v1\\.2");
    /// assert_eq!(name.no_components(), 2);
    /// ```
    pub fn from_literals<I, S>(literals: I, delimiter: Delimiter) -> Result<Self, ContractError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let d = delimiter.as_char();
        Self::from_components(
            literals.into_iter().map(|l| escape::mask(l.as_ref(), d)),
            delimiter,
        )
    }

    /// The delimiter character.
    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    /// How this name stores its components.
    pub fn representation(&self) -> Representation {
        self.storage.kind()
    }

    /// Copy this name into the given representation.
    ///
    /// The result is equal to `self`.
    pub fn with_representation(&self, kind: Representation) -> Result<Self, ContractError> {
        self.check_invariant()?;

        let components = self.components()?;
        let result = self.rebuild(kind, &components)?;

        ensure(result == *self, || {
            format!("conversion to {kind} storage changed the name")
        })?;
        self.check_invariant()?;
        Ok(result)
    }

    /// Number of components. A parsed name always has at least one.
    pub fn no_components(&self) -> usize {
        self.storage.len()
    }

    /// Whether the name has no components at all.
    ///
    /// A name parsed from the empty string has one empty component and is
    /// therefore not empty.
    pub fn is_empty(&self) -> bool {
        self.no_components() == 0
    }

    /// Get the masked component at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::IllegalArgument` if `index` is out of range.
    pub fn component(&self, index: usize) -> Result<String, ContractError> {
        self.check_invariant()?;
        require_index(index, self.no_components())?;

        let component = self.storage.get(index, self.delimiter.as_char())?;
        let component = component.ok_or_else(|| {
            ContractError::MethodFailed(format!("component {index} vanished during lookup"))
        })?;

        self.check_invariant()?;
        Ok(component)
    }

    /// All masked components, in order.
    pub fn components(&self) -> Result<Vec<String>, ContractError> {
        self.check_invariant()?;
        let components = self.storage.to_vec(self.delimiter.as_char())?;
        ensure(components.len() == self.no_components(), || {
            "component list length differs from component count".into()
        })?;
        Ok(components)
    }

    /// Return a new name with the component at `index` replaced by `c`.
    ///
    /// `c` must be masked for this name's delimiter.
    pub fn set_component(&self, index: usize, c: &str) -> Result<Self, ContractError> {
        self.check_invariant()?;
        require_index(index, self.no_components())?;
        check_component(c, self.delimiter)?;

        let mut components = self.components()?;
        components[index] = c.to_string();
        let result = self.rebuild(self.representation(), &components)?;

        ensure(result.component(index)? == c, || {
            format!("component {index} was not set")
        })?;
        ensure(result.no_components() == self.no_components(), || {
            "component count changed unexpectedly".into()
        })?;
        self.check_invariant()?;
        Ok(result)
    }

    /// Return a new name with `c` inserted before `index`.
    ///
    /// `index` may equal the component count, which appends.
    pub fn insert(&self, index: usize, c: &str) -> Result<Self, ContractError> {
        self.check_invariant()?;
        require_insert_index(index, self.no_components())?;
        check_component(c, self.delimiter)?;

        let mut components = self.components()?;
        components.insert(index, c.to_string());
        let result = self.rebuild(self.representation(), &components)?;

        ensure(result.component(index)? == c, || {
            format!("component was not inserted at index {index}")
        })?;
        ensure(result.no_components() == self.no_components() + 1, || {
            "component count did not increase by one".into()
        })?;
        self.check_invariant()?;
        Ok(result)
    }

    /// Return a new name with `c` as its last component.
    pub fn append(&self, c: &str) -> Result<Self, ContractError> {
        self.check_invariant()?;
        check_component(c, self.delimiter)?;

        let mut components = self.components()?;
        components.push(c.to_string());
        let result = self.rebuild(self.representation(), &components)?;

        let last = result.no_components().saturating_sub(1);
        ensure(result.component(last)? == c, || {
            "component was not appended".into()
        })?;
        ensure(result.no_components() == self.no_components() + 1, || {
            "component count did not increase by one".into()
        })?;
        self.check_invariant()?;
        Ok(result)
    }

    /// Return a new name without the component at `index`.
    pub fn remove(&self, index: usize) -> Result<Self, ContractError> {
        self.check_invariant()?;
        require_index(index, self.no_components())?;

        let mut components = self.components()?;
        components.remove(index);
        let result = self.rebuild(self.representation(), &components)?;

        ensure(result.no_components() + 1 == self.no_components(), || {
            "component count did not decrease by one".into()
        })?;
        self.check_invariant()?;
        Ok(result)
    }

    /// Return a new name with every component of `other` appended.
    ///
    /// Components of `other` are re-masked for this name's delimiter, so
    /// names with different delimiters concatenate by content.
    pub fn concat(&self, other: &Name) -> Result<Self, ContractError> {
        self.check_invariant()?;
        other.check_invariant()?;

        let (from, to) = (other.delimiter.as_char(), self.delimiter.as_char());
        let result = other
            .components()?
            .iter()
            .try_fold(self.clone(), |acc, c| acc.append(&escape::remask(c, from, to)))?;

        ensure(
            result.no_components() == self.no_components() + other.no_components(),
            || "component count did not increase by the other name's count".into(),
        )?;
        self.check_invariant()?;
        Ok(result)
    }

    /// Render with this name's own delimiter, components unmasked.
    ///
    /// The result is meant for humans. It is ambiguous whenever a
    /// component contains the delimiter; use [`Name::as_data_string`] for
    /// a re-parseable form.
    pub fn as_string(&self) -> Result<String, ContractError> {
        self.render(self.delimiter.as_char(), false)
    }

    /// Render with `delimiter`.
    ///
    /// If `delimiter` differs from this name's own, components are masked
    /// for it so that the result re-parses with `delimiter`.
    pub fn as_string_with(&self, delimiter: Delimiter) -> Result<String, ContractError> {
        require(delimiter.is_valid(), || {
            format!("'{delimiter}' cannot be used as a delimiter")
        })?;
        let remask = delimiter != self.delimiter;
        self.render(delimiter.as_char(), remask)
    }

    /// Canonical machine-readable form.
    ///
    /// Components are masked for the default delimiter `.` and joined with
    /// it, so names with equal content but different delimiters render to
    /// the same data string.
    ///
    /// Every component is unmasked and masked again, even when the name
    /// already uses `.`. An escape before an ordinary character (`\a`) is
    /// stored as given but canonicalizes to an escaped escape (`\\a`).
    pub fn as_data_string(&self) -> Result<String, ContractError> {
        self.render(DEFAULT_DELIMITER, true)
    }

    /// 32-bit rolling hash of the data string.
    ///
    /// Computed as `h = h * 31 + unit` over the UTF-16 code units of
    /// [`Name::as_data_string`], starting at zero and wrapping on overflow.
    pub fn hash_code(&self) -> Result<i32, ContractError> {
        self.check_invariant()?;
        let data = self.as_data_string()?;
        Ok(rolling_hash(&data))
    }

    /// Structural equality: same delimiter, same count, same masked
    /// components in the same order.
    pub fn is_equal(&self, other: &Name) -> Result<bool, ContractError> {
        self.check_invariant()?;
        if self.no_components() != other.no_components() || self.delimiter != other.delimiter {
            return Ok(false);
        }
        Ok(self.components()? == other.components()?)
    }

    /// Check the class invariant.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::InvalidState` if the delimiter is invalid or
    /// the backing storage is inconsistent.
    pub fn check_invariant(&self) -> Result<(), ContractError> {
        invariant(self.delimiter.is_valid(), || {
            "delimiter must be a single character other than the escape character".into()
        })?;
        self.storage.check(self.delimiter.as_char())
    }

    fn render(&self, delimiter: char, remask: bool) -> Result<String, ContractError> {
        self.check_invariant()?;

        let own = self.delimiter.as_char();
        let rendered: Vec<String> = self
            .components()?
            .iter()
            .map(|c| {
                let literal = escape::unmask(c, own);
                if remask {
                    escape::mask(&literal, delimiter)
                } else {
                    literal
                }
            })
            .collect();

        self.check_invariant()?;
        Ok(rendered.join(&delimiter.to_string()))
    }

    fn rebuild(&self, kind: Representation, components: &[String]) -> Result<Self, ContractError> {
        let name = Self {
            delimiter: self.delimiter,
            storage: Storage::build(kind, components, self.delimiter.as_char()),
        };
        name.check_invariant()?;
        Ok(name)
    }
}

/// Precondition on components handed to a name.
fn check_component(c: &str, delimiter: Delimiter) -> Result<(), ContractError> {
    require(escape::is_masked(c, delimiter.as_char()), || {
        format!("component '{c}' is not properly masked for delimiter '{delimiter}'")
    })
}

fn rolling_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other).unwrap_or(false)
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.hash_code() {
            Ok(code) => code.hash(state),
            // A corrupt name is unequal to every name, itself included.
            Err(_) => self.delimiter.hash(state),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_data_string() {
            Ok(data) => f.write_str(&data),
            Err(e) => write!(f, "<invalid name: {e}>"),
        }
    }
}

/// Serialized shape of a name: its delimiter and masked components.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct NameRecord {
    delimiter: Delimiter,
    components: Vec<String>,
    #[serde(default)]
    representation: Representation,
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = NameRecord {
            delimiter: self.delimiter,
            components: self.components().map_err(S::Error::custom)?,
            representation: self.representation(),
        };
        record.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = NameRecord::deserialize(deserializer)?;
        let name =
            Name::from_components(record.components, record.delimiter).map_err(D::Error::custom)?;
        if record.representation == name.representation() {
            Ok(name)
        } else {
            name.with_representation(record.representation)
                .map_err(D::Error::custom)
        }
    }
}
