//! config command - Show or change configuration

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::Config;
use crate::ui::output;

/// Print the path of the config file in use.
pub fn path(ctx: &Context) -> Result<()> {
    output::result(config_file(ctx)?.display());
    Ok(())
}

/// Print the effective configuration.
pub fn show(ctx: &Context) -> Result<()> {
    let config = load(ctx)?;

    if ctx.json || config.json() {
        output::json(&serde_json::json!({
            "path": config.path(),
            "delimiter": config.delimiter(),
            "json": config.json(),
            "representation": config.representation(),
        }))?;
    } else {
        output::result(format!("delimiter = {}", config.delimiter()));
        output::result(format!("json = {}", config.json()));
        output::result(format!("representation = {}", config.representation()));
    }
    Ok(())
}

/// Set `key` to `value` and write the config file.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let path = config_file(ctx)?;
    let mut config = load(ctx)?;

    config
        .set(key, value)
        .with_context(|| format!("Cannot set {} = {}", key, value))?;
    config
        .write(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    output::print(format!("Set {} = {}", key, value), ctx.verbosity);
    Ok(())
}

/// The file `config` commands read and write.
fn config_file(ctx: &Context) -> Result<PathBuf> {
    match &ctx.config_path {
        Some(path) => Ok(path.clone()),
        None => Config::default_path().context("Cannot locate config file"),
    }
}

/// Load the config file, treating a missing file as defaults.
fn load(ctx: &Context) -> Result<Config> {
    let path = config_file(ctx)?;
    if !path.exists() {
        output::debug(
            format!("{} does not exist, using defaults", path.display()),
            ctx.verbosity,
        );
        return Ok(Config::default());
    }
    Config::load(Some(&path)).context("Failed to load configuration")
}
