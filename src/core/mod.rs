//! core
//!
//! Core domain types and operations for namekit.
//!
//! # Modules
//!
//! - [`escape`] - Masking and unmasking of components
//! - [`tokenizer`] - Splitting flat strings into components
//! - [`types`] - Strong types: Delimiter, Representation
//! - [`contract`] - Precondition, postcondition, and invariant checks
//! - [`name`] - The `Name` value object and its two representations
//! - [`files`] - In-memory file tree built on names
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing keeps invalid delimiters unrepresentable
//! - Every public operation is guarded by explicit contracts
//! - Names are values: edits produce new names

pub mod config;
pub mod contract;
pub mod escape;
pub mod files;
pub mod name;
pub mod tokenizer;
pub mod types;

pub use contract::ContractError;
pub use name::Name;
pub use types::{Delimiter, Representation};
