//! Wavechunk CLI - WAV Chunking Toolkit
//!
//! Command-line interface for the wavechunk toolkit.

use clap::Parser;
use env_logger::Env;
use log::info;

use wavechunk::cli::{commands, Cli, Commands};
use wavechunk::Result;

fn main() -> Result<()> {
    // Initialize logger
    let default_filter = "info";
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let cli = Cli::parse();

    info!("Wavechunk v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Wavechunk v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Split {
            input,
            threshold,
            min_secs,
            max_secs,
            levels,
        } => commands::split(&input, threshold, min_secs, max_secs, levels),
        Commands::Merge { files } => commands::merge(&files),
        Commands::Plan {
            durations,
            window_secs,
            json,
        } => commands::plan(&durations, window_secs, json),
        Commands::RenameChunks {
            dir,
            prefix,
            dry_run,
        } => commands::rename_chunks(&dir, prefix.as_deref(), dry_run),
        Commands::Compare { a, b, strict } => commands::compare(&a, &b, strict),
    }
}
