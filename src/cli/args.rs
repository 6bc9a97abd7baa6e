//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Read configuration from this file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::{Delimiter, Representation};

/// nk - inspect and edit delimiter-separated names
#[derive(Parser, Debug)]
#[command(name = "nk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit JSON output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split a name into its components
    #[command(
        name = "parse",
        long_about = "Split a name into its components.\n\n\
            The source is read as a masked name: a backslash escapes the next \
            character, so an escaped delimiter stays inside its component. \
            Components are printed in their stored (masked) form.",
        after_help = "\
EXAMPLES:
    # Four components
    nk parse oss.cs.fau.de

    # Escaped delimiter stays inside the first component
    nk parse 'a\\.b.c'

    # Slash-delimited, stored one string per component
    nk parse /usr/bin -d / --representation components"
    )]
    Parse {
        /// The name to parse
        source: String,

        /// Delimiter of the source name
        #[arg(short, long)]
        delimiter: Option<Delimiter>,

        /// Storage to use: components or joined
        #[arg(long)]
        representation: Option<Representation>,
    },

    /// Render a name for humans, optionally with another delimiter
    #[command(
        name = "render",
        after_help = "\
EXAMPLES:
    # Unmask with the name's own delimiter
    nk render 'a\\.b.c'            # a.b.c

    # Switch to '/', masking any literal '/' in components
    nk render a.b/c --to /         # a/b\\/c"
    )]
    Render {
        /// The name to render
        source: String,

        /// Delimiter of the source name
        #[arg(short, long)]
        delimiter: Option<Delimiter>,

        /// Delimiter to render with
        #[arg(long)]
        to: Option<Delimiter>,
    },

    /// Print the canonical data string of a name
    Data {
        /// The name to render
        source: String,

        /// Delimiter of the source name
        #[arg(short, long)]
        delimiter: Option<Delimiter>,
    },

    /// Print the hash code of a name
    Hash {
        /// The name to hash
        source: String,

        /// Delimiter of the source name
        #[arg(short, long)]
        delimiter: Option<Delimiter>,
    },

    /// Mask literal text for use as a component
    Mask {
        /// Literal component text
        text: String,

        /// Delimiter to mask for
        #[arg(short, long)]
        delimiter: Option<Delimiter>,
    },

    /// Restore the literal text of a masked component
    Unmask {
        /// Masked component text
        text: String,

        /// Delimiter the text was masked for
        #[arg(short, long)]
        delimiter: Option<Delimiter>,
    },

    /// Compare two names; exits 1 if they differ
    #[command(name = "eq")]
    Eq {
        /// First name
        a: String,

        /// Second name
        b: String,

        /// Delimiter of the first name
        #[arg(short, long)]
        delimiter: Option<Delimiter>,

        /// Delimiter of the second name (defaults to the first's)
        #[arg(long)]
        other_delimiter: Option<Delimiter>,
    },

    /// Apply a value-object edit and print the resulting name
    #[command(
        name = "edit",
        after_help = "\
EXAMPLES:
    nk edit a.b append c           # a.b.c
    nk edit a.c insert 1 b         # a.b.c
    nk edit a.b.c set 0 'x\\.y'     # x\\.y.b.c
    nk edit a.b.c remove 2         # a.b
    nk edit a.b concat c/d --other-delimiter /"
    )]
    Edit {
        /// The name to edit
        source: String,

        /// Delimiter of the source name
        #[arg(short, long)]
        delimiter: Option<Delimiter>,

        #[command(subcommand)]
        op: EditOp,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    # Bash (add to ~/.bashrc)
    nk completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    nk completion zsh >> ~/.zshrc

    # Fish
    nk completion fish > ~/.config/fish/completions/nk.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Structural edits. Components are given in masked form.
#[derive(Subcommand, Debug)]
pub enum EditOp {
    /// Append a component
    Append {
        /// Masked component
        component: String,
    },
    /// Insert a component before an index
    Insert {
        /// Insertion index (may equal the component count)
        index: usize,
        /// Masked component
        component: String,
    },
    /// Replace the component at an index
    Set {
        /// Component index
        index: usize,
        /// Masked component
        component: String,
    },
    /// Remove the component at an index
    Remove {
        /// Component index
        index: usize,
    },
    /// Append every component of another name
    Concat {
        /// The other name
        other: String,

        /// Delimiter of the other name (defaults to the edited name's)
        #[arg(long)]
        other_delimiter: Option<Delimiter>,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the config file path
    Path,
    /// Print the effective configuration
    Show,
    /// Set a configuration value and write the config file
    Set {
        /// Configuration key: delimiter, json, or representation
        key: String,
        /// Value to set
        value: String,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_delimiter_flag() {
        let cli = Cli::try_parse_from(["nk", "parse", "a/b", "-d", "/"]).unwrap();
        match cli.command {
            Command::Parse { delimiter, .. } => {
                assert_eq!(delimiter.map(Delimiter::as_char), Some('/'));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_multi_character_delimiter() {
        assert!(Cli::try_parse_from(["nk", "parse", "a::b", "-d", "::"]).is_err());
    }

    #[test]
    fn parses_edit_op() {
        let cli = Cli::try_parse_from(["nk", "--json", "edit", "a.b", "insert", "1", "x"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Edit {
                op: EditOp::Insert { index, component },
                ..
            } => {
                assert_eq!(index, 1);
                assert_eq!(component, "x");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
