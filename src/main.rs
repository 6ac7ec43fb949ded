//! humo-suppress CLI
//!
//! Command-line interface for the HuMo lip-sync suppression stage.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::debug;

use humo_suppress::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("humo-suppress v{}", env!("CARGO_PKG_VERSION"));

    handle_command(cli.command)
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Classify {
            audio,
            threshold,
            invert,
        } => {
            commands::classify(&audio, threshold, invert)
                .with_context(|| format!("classifying {}", audio.display()))?;
        }
        Commands::Edit {
            embeds,
            output,
            disabled,
            params,
        } => {
            commands::edit(&embeds, &output, !disabled, params.as_deref())
                .with_context(|| format!("editing {}", embeds.display()))?;
        }
        Commands::Run {
            audio,
            embeds,
            output,
            threshold,
            invert,
            params,
        } => {
            commands::run(&audio, &embeds, &output, threshold, invert, params.as_deref())
                .context("running suppression pipeline")?;
        }
        Commands::Preset => commands::print_preset()?,
    }
    Ok(())
}
