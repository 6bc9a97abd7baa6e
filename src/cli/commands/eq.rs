//! eq command - Compare two names structurally

use std::process::ExitCode;

use anyhow::Result;
use serde_json::json;

use super::load_name;
use crate::cli::Context;
use crate::core::types::Delimiter;
use crate::ui::output;

/// Compare `a` and `b`. Succeeds only when they are equal.
pub fn eq(
    ctx: &Context,
    a: &str,
    b: &str,
    delimiter: Option<Delimiter>,
    other_delimiter: Option<Delimiter>,
) -> Result<ExitCode> {
    let left = load_name(ctx, a, delimiter, None)?;
    let right = load_name(ctx, b, Some(other_delimiter.unwrap_or(left.delimiter())), None)?;

    if left.delimiter() != right.delimiter() {
        output::warn(
            format!(
                "names use different delimiters ('{}' vs '{}') and never compare equal",
                left.delimiter(),
                right.delimiter()
            ),
            ctx.verbosity,
        );
    }

    let equal = left.is_equal(&right)?;
    output::debug(
        format!("comparing {:?} with {:?}", left, right),
        ctx.verbosity,
    );

    if ctx.json {
        output::json(&json!({
            "equal": equal,
            "hash_codes": [left.hash_code()?, right.hash_code()?],
        }))?;
    } else if equal {
        output::print("equal", ctx.verbosity);
    } else {
        output::print("not equal", ctx.verbosity);
    }

    Ok(if equal {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
