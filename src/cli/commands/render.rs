//! render, data, and hash commands - Print derived forms of a name

use anyhow::Result;
use serde_json::json;

use super::load_name;
use crate::cli::Context;
use crate::core::types::Delimiter;
use crate::ui::output;

/// Print the human-readable form of `source`, optionally with another
/// delimiter.
pub fn render(
    ctx: &Context,
    source: &str,
    delimiter: Option<Delimiter>,
    to: Option<Delimiter>,
) -> Result<()> {
    let name = load_name(ctx, source, delimiter, None)?;
    let rendered = match to {
        Some(to) => name.as_string_with(to)?,
        None => name.as_string()?,
    };

    if ctx.json {
        output::json(&json!({
            "delimiter": to.unwrap_or(name.delimiter()),
            "rendered": rendered,
        }))?;
    } else {
        output::result(rendered);
    }
    Ok(())
}

/// Print the canonical data string of `source`.
pub fn data(ctx: &Context, source: &str, delimiter: Option<Delimiter>) -> Result<()> {
    let name = load_name(ctx, source, delimiter, None)?;
    let data = name.as_data_string()?;

    if ctx.json {
        output::json(&json!({ "data_string": data }))?;
    } else {
        output::result(data);
    }
    Ok(())
}

/// Print the hash code of `source`.
pub fn hash(ctx: &Context, source: &str, delimiter: Option<Delimiter>) -> Result<()> {
    let name = load_name(ctx, source, delimiter, None)?;
    let code = name.hash_code()?;

    if ctx.json {
        output::json(&json!({ "hash_code": code }))?;
    } else {
        output::result(code);
    }
    Ok(())
}
