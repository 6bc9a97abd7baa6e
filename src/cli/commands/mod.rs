//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves delimiter and representation defaults from the context
//! 2. Builds names through [`crate::core::name::Name`]
//! 3. Formats and displays output through [`crate::ui::output`]
//!
//! Contract errors from the library are wrapped with the offending input
//! and propagated; `main` prints them and exits non-zero.

mod codec;
mod completion;
mod config_cmd;
mod edit;
mod eq;
mod parse;
mod render;

pub use codec::{mask, unmask};
pub use completion::completion;
pub use config_cmd::{path as config_path, set as config_set, show as config_show};
pub use edit::edit;
pub use eq::eq;
pub use parse::parse;
pub use render::{data, hash, render};

use std::process::ExitCode;

use anyhow::{Context as _, Result};

use super::args::{Command, ConfigAction};
use super::Context;
use crate::core::name::Name;
use crate::core::types::{Delimiter, Representation};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<ExitCode> {
    match command {
        Command::Parse {
            source,
            delimiter,
            representation,
        } => parse::parse(ctx, &source, delimiter, representation)?,
        Command::Render {
            source,
            delimiter,
            to,
        } => render::render(ctx, &source, delimiter, to)?,
        Command::Data { source, delimiter } => render::data(ctx, &source, delimiter)?,
        Command::Hash { source, delimiter } => render::hash(ctx, &source, delimiter)?,
        Command::Mask { text, delimiter } => codec::mask(ctx, &text, delimiter)?,
        Command::Unmask { text, delimiter } => codec::unmask(ctx, &text, delimiter)?,
        Command::Eq {
            a,
            b,
            delimiter,
            other_delimiter,
        } => return eq::eq(ctx, &a, &b, delimiter, other_delimiter),
        Command::Edit {
            source,
            delimiter,
            op,
        } => edit::edit(ctx, &source, delimiter, op)?,
        Command::Completion { shell } => completion::completion(shell)?,
        Command::Config { action } => match action {
            ConfigAction::Path => config_cmd::path(ctx)?,
            ConfigAction::Show => config_cmd::show(ctx)?,
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value)?,
        },
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse `source` with the resolved delimiter and representation.
pub(crate) fn load_name(
    ctx: &Context,
    source: &str,
    delimiter: Option<Delimiter>,
    representation: Option<Representation>,
) -> Result<Name> {
    let delimiter = ctx.delimiter(delimiter);
    let representation = ctx.representation(representation);

    let name = Name::parse(source, delimiter)
        .with_context(|| format!("Invalid name '{}'", source))?;
    if name.representation() == representation {
        return Ok(name);
    }
    name.with_representation(representation)
        .with_context(|| format!("Failed to convert '{}' to {} storage", source, representation))
}
