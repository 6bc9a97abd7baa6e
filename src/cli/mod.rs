//! cli
//!
//! Command-line interface layer for namekit.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialize logging and load configuration
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! handlers that call into [`crate::core`]. All name semantics live in the
//! library; handlers only resolve defaults and format output.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::core::types::{Delimiter, Representation};
use crate::ui::output::Verbosity;

/// Settings shared by every command handler.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output verbosity
    pub verbosity: Verbosity,
    /// Emit JSON output
    pub json: bool,
    /// Loaded configuration
    pub config: Config,
    /// Explicit config path from `--config`
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Delimiter for names given on the command line.
    ///
    /// The flag wins over the config file, which wins over `.`.
    pub fn delimiter(&self, flag: Option<Delimiter>) -> Delimiter {
        flag.unwrap_or_else(|| self.config.delimiter())
    }

    /// Storage for parsed names.
    pub fn representation(&self, flag: Option<Representation>) -> Representation {
        flag.unwrap_or_else(|| self.config.representation())
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    init_logging(verbosity);

    // `config` manages the file itself and must work when it is missing or
    // broken.
    let config = if matches!(cli.command, args::Command::Config { .. }) {
        Config::default()
    } else {
        Config::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    let ctx = Context {
        verbosity,
        json: cli.json || config.json(),
        config,
        config_path: cli.config.clone(),
    };

    commands::dispatch(cli.command, &ctx)
}

fn init_logging(verbosity: Verbosity) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(verbosity.log_filter());
    if verbosity != Verbosity::Debug {
        builder.parse_env("RUST_LOG");
    }
    // A logger may already be installed when run from tests.
    let _ = builder.format_timestamp(None).try_init();
}
