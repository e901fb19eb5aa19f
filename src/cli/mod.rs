//! CLI module for lrcsync.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// lrcsync - lyrics that follow the audio
///
/// Parses LRC and SRT transcripts, standalone or embedded in markdown notes,
/// and highlights the active line against a playback clock.
#[derive(Parser, Debug)]
#[command(name = "lrcsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a transcript and print its lines
    Show {
        /// Transcript file, or a markdown note holding a transcript block
        file: String,

        /// Print the parsed document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score every transcript format against a file
    Detect {
        /// Transcript file or note
        file: String,
    },

    /// Print the line active at a playback time
    At {
        /// Transcript file or note
        file: String,

        /// Playback time (mm:ss[.fff], hh:mm:ss[.fff] or milliseconds)
        time: String,
    },

    /// Print the note range a transcript line was read from
    Locate {
        /// Markdown note holding a transcript block
        note: String,

        /// Zero-based index of the transcript line
        line: usize,
    },

    /// Follow a simulated playback clock and highlight lines as they play
    Follow {
        /// Transcript file or note
        file: String,

        /// Pause at every line boundary until resumed
        #[arg(long)]
        sentence: bool,

        /// Do not announce scroll requests
        #[arg(long)]
        no_scroll: bool,

        /// Start position
        #[arg(long)]
        start: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "playback.sentence_mode")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
