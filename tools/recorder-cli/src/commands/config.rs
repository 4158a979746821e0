//! Configuration management commands.

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let content = toml::to_string_pretty(&ctx.config).context("Failed to serialize config")?;
    ctx.output.info("");
    for line in content.lines() {
        eprintln!("  {}", line);
    }

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("recorder.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    tokio::fs::write(&config_path, generate_default_config())
        .await
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.config
        .render
        .validate()
        .context("Render options are invalid")?;

    if ctx.config.stream.max_initial_chunk == 0 || ctx.config.stream.max_chunk == 0 {
        ctx.output
            .info("Chunk size 0 flushes after every token under the auto strategy");
    }

    ctx.output.success("Configuration is valid");
    Ok(())
}
