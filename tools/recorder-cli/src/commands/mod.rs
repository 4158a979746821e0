//! CLI command implementations.

pub mod config;
pub mod render;

use clap::{Args, Subcommand, ValueEnum};
use recorder_streaming::FlushStrategy;

/// Which entry renders the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderMode {
    /// Whole document in one write.
    String,
    /// Ordered chunks, flushed as they are produced.
    Stream,
}

/// Flush strategy override for stream mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Auto,
    Direct,
    Disabled,
}

impl From<StrategyArg> for FlushStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => FlushStrategy::Auto,
            StrategyArg::Direct => FlushStrategy::Direct,
            StrategyArg::Disabled => FlushStrategy::Disabled,
        }
    }
}

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Render mode.
    #[arg(short, long, value_enum, default_value = "string")]
    pub mode: RenderMode,

    /// Write the document to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override the configured flush strategy (stream mode only).
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the render options in the config file.
    Validate,
}
