//! namekit - hierarchical, delimiter-separated names
//!
//! A name is a sequence of text components joined by a single delimiter
//! character, such as `oss.cs.fau.de` or `/usr/bin`. The delimiter and the
//! escape character `\` may appear inside a component only when masked.
//!
//! # Architecture
//!
//! - [`core`] - Escaping, tokenizing, contracts, the `Name` value object,
//!   and a small file tree that consumes names
//! - [`cli`] - The `nk` command-line interface
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! 1. `unmask(mask(s, d), d) == s` for every string and delimiter
//! 2. Both name representations are observably identical
//! 3. Structural operations never modify their receiver
//! 4. Contract violations are reported with one of three distinct error
//!    kinds and leave no partial result behind

pub mod cli;
pub mod core;
pub mod ui;
