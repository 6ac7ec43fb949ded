//! CLI Module
//!
//! Command-line interface for running the loudness gate and band editor
//! on JSON payloads.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::gate::DEFAULT_THRESHOLD;

/// HuMo lip-sync suppression - band-gain editing of audio embeddings
#[derive(Parser, Debug)]
#[command(name = "humo-suppress")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decide from audio whether suppression should be enabled
    #[command(name = "classify")]
    Classify {
        /// Audio payload (JSON sample list, [rate, samples] pair or nested array)
        audio: PathBuf,

        /// RMS threshold below which audio counts as silent
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,

        /// Enable suppression when audio is loud instead of silent
        #[arg(long)]
        invert: bool,
    },

    /// Edit the audio embedding inside an image embeds file
    #[command(name = "edit")]
    Edit {
        /// Image embeds JSON file
        embeds: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Pass embeds through without editing
        #[arg(long)]
        disabled: bool,

        /// Edit parameters JSON (defaults to the preset)
        #[arg(short, long)]
        params: Option<PathBuf>,
    },

    /// Classify audio and edit embeds when suppression is enabled
    #[command(name = "run")]
    Run {
        /// Audio payload JSON file
        audio: PathBuf,

        /// Image embeds JSON file
        embeds: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// RMS threshold below which audio counts as silent
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,

        /// Enable suppression when audio is loud instead of silent
        #[arg(long)]
        invert: bool,

        /// Edit parameters JSON (defaults to the preset)
        #[arg(short, long)]
        params: Option<PathBuf>,
    },

    /// Print the preset edit parameters
    #[command(name = "preset")]
    Preset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classify_defaults() {
        let cli = Cli::try_parse_from(["humo-suppress", "classify", "audio.json"]).unwrap();
        match cli.command {
            Commands::Classify {
                threshold, invert, ..
            } => {
                assert_eq!(threshold, DEFAULT_THRESHOLD);
                assert!(!invert);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "humo-suppress",
            "-v",
            "run",
            "audio.json",
            "embeds.json",
            "-o",
            "out.json",
            "--threshold",
            "0.05",
            "--invert",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Run { threshold, invert: true, .. } if threshold == 0.05
        ));
    }

    #[test]
    fn test_edit_requires_output() {
        assert!(Cli::try_parse_from(["humo-suppress", "edit", "embeds.json"]).is_err());
    }
}
