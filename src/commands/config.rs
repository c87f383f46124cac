//! `config`: persist or show the API key and model.

use std::io::Write;

use super::{CommandContext, CommandError, Outcome};
use crate::config::{self, Config, ConfigError};
use crate::constants;
use crate::output;

/// Options collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub api_key: Option<String>,
    pub model: Option<String>,
}

/// Save the given fields to the global config file, or print the
/// current settings when none are given.
pub fn run<W: Write>(
    ctx: &CommandContext,
    options: ConfigOptions,
    out: &mut W,
) -> Result<Outcome, CommandError> {
    if options.api_key.is_none() && options.model.is_none() {
        show(ctx, out)?;
        return Ok(Outcome::Completed);
    }

    let path = ctx.paths.global.clone().ok_or(ConfigError::NoConfigDir)?;
    let saved = config::save_credentials(&path, options.api_key, options.model)?;

    output::success(&format!("Configuration saved to {}", path.display()));
    if let Some(model) = saved.model {
        output::info(&format!("Model: {model}"));
    }
    Ok(Outcome::Completed)
}

fn show<W: Write>(ctx: &CommandContext, out: &mut W) -> Result<(), CommandError> {
    let config = Config::load(&ctx.paths, &ctx.env)?;
    let provider = &config.provider;

    let key = provider
        .api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .map(config::mask_key)
        .unwrap_or_else(|| "(not set)".to_string());
    let model = provider
        .model
        .as_deref()
        .unwrap_or(constants::DEFAULT_MODEL);
    let base_url = provider
        .base_url
        .as_deref()
        .unwrap_or(constants::DEFAULT_BASE_URL);

    writeln!(out, "API key:  {key}")?;
    writeln!(out, "Model:    {model}")?;
    writeln!(out, "Base URL: {base_url}")?;
    match &ctx.paths.global {
        Some(path) => writeln!(out, "Config:   {}", path.display())?,
        None => writeln!(out, "Config:   (no config directory)")?,
    }
    Ok(())
}
