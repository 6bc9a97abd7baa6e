//! parse command - Split a name into its components

use anyhow::Result;
use serde::Serialize;

use super::load_name;
use crate::cli::Context;
use crate::core::types::{Delimiter, Representation};
use crate::ui::output;

/// Everything `parse` reports about a name.
#[derive(Debug, Serialize)]
struct ParseReport {
    delimiter: Delimiter,
    representation: Representation,
    no_components: usize,
    is_empty: bool,
    components: Vec<String>,
    as_string: String,
    data_string: String,
    hash_code: i32,
}

/// Split `source` and print its components.
pub fn parse(
    ctx: &Context,
    source: &str,
    delimiter: Option<Delimiter>,
    representation: Option<Representation>,
) -> Result<()> {
    let name = load_name(ctx, source, delimiter, representation)?;
    output::debug(format!("parsed {:?}", name), ctx.verbosity);

    let report = ParseReport {
        delimiter: name.delimiter(),
        representation: name.representation(),
        no_components: name.no_components(),
        is_empty: name.is_empty(),
        components: name.components()?,
        as_string: name.as_string()?,
        data_string: name.as_data_string()?,
        hash_code: name.hash_code()?,
    };

    if ctx.json {
        output::json(&report)?;
        return Ok(());
    }

    output::print(output::format_name(&name), ctx.verbosity);
    output::result(output::format_components(&report.components));
    Ok(())
}
