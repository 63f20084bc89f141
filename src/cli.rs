//! # Command-Line Interface Module
//!
//! Clap derive definitions for the `retrovision` binary.
//!
//! ## Commands
//!
//! - `channels`: List the decade channels and their years
//! - `lineup`: Load a channel and print what would play next
//! - `inspect`: Show catalog size, tier split and the most viewed videos
//! - `completion`: Generate shell completions
//!
//! ## Examples
//!
//! ```bash
//! retrovision --data-dir public/data lineup MTV90 --count 20
//! retrovision lineup mtv00 --mode avoid-repeats --json
//! retrovision inspect MTV80 --top 5
//! ```

use crate::scheduler::SelectionMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Selection modes as exposed on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum Mode {
    /// Never repeat; 7 of every 10 picks from the popular half
    Quota,
    /// Never repeat until everything played, then start over
    AvoidRepeats,
    /// Popularity-weighted, repeats allowed
    Shuffle,
}

impl From<Mode> for SelectionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Quota => Self::Quota,
            Mode::AvoidRepeats => Self::AvoidRepeats,
            Mode::Shuffle => Self::Shuffle,
        }
    }
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "retrovision")]
#[command(about = "Retrovision: retro music-video channels that never repeat")]
#[command(version)]
pub struct Args {
    /// Directory containing the `<year>.json` catalog files
    ///
    /// Defaults to the platform data directory (e.g. ~/.local/share/retrovision/data).
    #[arg(long, global = true, env = "RETROVISION_DATA_DIR", value_hint = clap::ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the available channels
    Channels,

    /// Print the upcoming lineup for a channel
    ///
    /// Loads every yearly catalog file of the channel and asks the scheduler
    /// for the next videos, exactly as the player would.
    Lineup {
        /// Channel key, e.g. MTV90 (case-insensitive)
        #[arg(value_hint = clap::ValueHint::Other)]
        channel: String,

        /// Number of videos to schedule
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Selection mode
        #[arg(short, long, value_enum, default_value = "quota")]
        mode: Mode,

        /// Start over when a quota lineup has played every video
        #[arg(long = "loop")]
        loop_on_exhaust: bool,

        /// Length of the repeating quota window
        #[arg(long, default_value = "10")]
        window: u32,

        /// Slots per window reserved for the popular half
        #[arg(long, default_value = "7")]
        high_slots: u32,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show how a channel's catalog splits into popularity tiers
    Inspect {
        /// Channel key, e.g. MTV90 (case-insensitive)
        #[arg(value_hint = clap::ValueHint::Other)]
        channel: String,

        /// How many of the most viewed videos to list
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Generate shell completions
    ///
    /// Usage: retrovision completion bash > ~/.local/share/bash-completion/completions/retrovision
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// List channel keys for completion (hidden command)
    #[command(hide = true)]
    CompleteChannels,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_lineup_defaults() {
        let args = Args::try_parse_from(["retrovision", "lineup", "MTV90"]).unwrap();
        match args.command {
            Command::Lineup {
                channel,
                count,
                mode,
                loop_on_exhaust,
                window,
                high_slots,
                json,
            } => {
                assert_eq!(channel, "MTV90");
                assert_eq!(count, 10);
                assert_eq!(mode, Mode::Quota);
                assert!(!loop_on_exhaust);
                assert_eq!((window, high_slots), (10, 7));
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_lineup_flags() {
        let args = Args::try_parse_from([
            "retrovision",
            "--data-dir",
            "/tmp/catalog",
            "lineup",
            "mtv00",
            "-n",
            "3",
            "--mode",
            "avoid-repeats",
            "--loop",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/catalog")));
        let Command::Lineup { count, mode, loop_on_exhaust, json, .. } = args.command else {
            panic!("expected lineup");
        };
        assert_eq!(count, 3);
        assert_eq!(SelectionMode::from(mode), SelectionMode::AvoidRepeats);
        assert!(loop_on_exhaust);
        assert!(json);
    }
}
