use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use super::animate::AnimateCommand;
use super::easings::EasingsCommand;
use super::preview::PreviewCommand;
use crate::config::EngineConfig;

/// Motionline - time-driven property animation with easings, timelines and presets
#[derive(Parser)]
#[command(
    name = "motionline",
    version,
    about = "Time-driven property animation with easings, timelines and presets",
    long_about = r#"Motionline interpolates numbers, unit strings, colors and transforms over time.
The binary previews the built-in easings and presets against an in-memory target.

Examples:
  motionline easings --samples 5              # Tabulate every named easing
  motionline preview bounce --json            # Print each frame of a preset as JSON
  motionline animate '{"opacity": [0, 1]}'    # Animate custom properties"#
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every named easing sampled across [0, 1]
    Easings(EasingsCommand),
    /// Play a preset and print each frame
    Preview(PreviewCommand),
    /// Play a custom property set and print each frame
    Animate(AnimateCommand),
}

impl Cli {
    pub async fn execute(self, config: &EngineConfig) -> Result<()> {
        if self.debug {
            debug!("Debug logging enabled");
        }

        config.validate()?;
        debug!(fps = config.fps, easing = %config.default_easing, "Configuration validated");

        match self.command {
            Commands::Easings(cmd) => cmd.execute(),
            Commands::Preview(cmd) => cmd.execute(config).await,
            Commands::Animate(cmd) => cmd.execute(config).await,
        }
    }
}
