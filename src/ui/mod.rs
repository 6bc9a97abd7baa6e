//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All user-facing output of the `nk` binary goes through this module so
//! quiet, debug, and JSON modes are handled in one place.

pub mod output;
