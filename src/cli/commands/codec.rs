//! mask and unmask commands - Convert between literal and masked text

use anyhow::Result;
use serde_json::json;

use crate::cli::Context;
use crate::core::escape;
use crate::core::types::Delimiter;
use crate::ui::output;

/// Print `text` masked for the resolved delimiter.
pub fn mask(ctx: &Context, text: &str, delimiter: Option<Delimiter>) -> Result<()> {
    let delimiter = ctx.delimiter(delimiter);
    emit(ctx, text, &escape::mask(text, delimiter.as_char()))
}

/// Print `text` with masking for the resolved delimiter removed.
pub fn unmask(ctx: &Context, text: &str, delimiter: Option<Delimiter>) -> Result<()> {
    let delimiter = ctx.delimiter(delimiter);
    emit(ctx, text, &escape::unmask(text, delimiter.as_char()))
}

fn emit(ctx: &Context, input: &str, converted: &str) -> Result<()> {
    if ctx.json {
        output::json(&json!({ "input": input, "output": converted }))?;
    } else {
        output::result(converted);
    }
    Ok(())
}
