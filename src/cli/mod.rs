//! CLI Module
//!
//! Command-line interface for the wavechunk toolkit.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wavechunk - silence-based WAV splitting and chunk merging
#[derive(Parser, Debug)]
#[command(name = "wavechunk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a WAV file into chunks at silence boundaries
    #[command(name = "split")]
    Split {
        /// Input WAV file
        input: PathBuf,

        /// Silence threshold, full-scale normalized
        #[arg(long, default_value_t = 0.01)]
        threshold: f64,

        /// Minimum chunk length in seconds
        #[arg(long, default_value_t = 1.0)]
        min_secs: f64,

        /// Maximum chunk length in seconds
        #[arg(long, default_value_t = 30.0)]
        max_secs: f64,

        /// Print per-block levels to stdout
        #[arg(long)]
        levels: bool,
    },

    /// Concatenate WAV files into one
    #[command(name = "merge")]
    Merge {
        /// Input WAV files followed by the output file
        #[arg(required = true, num_args = 2..)]
        files: Vec<PathBuf>,
    },

    /// Plan which chunks to merge under a duration budget
    #[command(name = "plan")]
    Plan {
        /// Chunk durations as HH:MM:SS.hh timestamps (stdin when empty)
        durations: Vec<String>,

        /// Duration budget per merged piece, in seconds
        #[arg(long, default_value_t = 10.0)]
        window_secs: f64,

        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rename old-style chunk files to <stem>.chunk<N>.wav
    #[command(name = "rename-chunks")]
    RenameChunks {
        /// Directory containing the chunk files
        dir: PathBuf,

        /// Only rename files starting with this prefix
        #[arg(short, long)]
        prefix: Option<String>,

        /// List the renames without performing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Compare two dotted version numbers
    #[command(name = "compare")]
    Compare {
        /// Left version
        a: String,

        /// Right version
        b: String,

        /// Reject non-numeric segments instead of coercing them to zero
        #[arg(long)]
        strict: bool,
    },
}
