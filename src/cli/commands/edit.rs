//! edit command - Apply one value-object operation to a name

use anyhow::{Context as _, Result};

use super::load_name;
use crate::cli::args::EditOp;
use crate::cli::Context;
use crate::core::tokenizer;
use crate::core::types::Delimiter;
use crate::ui::output;

/// Apply `op` to `source` and print the resulting name in masked form.
pub fn edit(ctx: &Context, source: &str, delimiter: Option<Delimiter>, op: EditOp) -> Result<()> {
    let name = load_name(ctx, source, delimiter, None)?;

    let edited = match &op {
        EditOp::Append { component } => name.append(component),
        EditOp::Insert { index, component } => name.insert(*index, component),
        EditOp::Set { index, component } => name.set_component(*index, component),
        EditOp::Remove { index } => name.remove(*index),
        EditOp::Concat {
            other,
            other_delimiter,
        } => {
            let other_delimiter = Some(other_delimiter.unwrap_or(name.delimiter()));
            let other = load_name(ctx, other, other_delimiter, None)?;
            name.concat(&other)
        }
    }
    .with_context(|| format!("Cannot apply {:?} to '{}'", op, source))?;

    output::debug(
        format!("{} -> {}", output::format_name(&name), output::format_name(&edited)),
        ctx.verbosity,
    );

    if ctx.json {
        output::json(&edited)?;
    } else {
        let components = edited.components()?;
        output::result(tokenizer::join(&components, edited.delimiter().as_char()));
    }
    Ok(())
}
