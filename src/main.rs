//! Rampart CLI - run the decision engine against recorded engine input.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Rampart - a turn-based tactical decision engine
#[derive(Parser, Debug)]
#[command(name = "rampart")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Decide a single turn from a snapshot
    Turn {
        /// Turn snapshot (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Action frames observed before the turn (JSON array)
        #[arg(long)]
        frames: Option<PathBuf>,

        /// Engine configuration (JSON, default: standard game)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Stream engine events and decide every turn
    Play {
        /// Engine events, one JSON object per line
        #[arg(short, long)]
        input: PathBuf,

        /// Engine configuration (JSON, default: standard game)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Show the region layout of the board
    Regions {
        /// Engine configuration (JSON, default: standard game)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rampart=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match args.command {
        Commands::Turn {
            snapshot,
            frames,
            config,
            format,
        } => cli::turn::execute(&snapshot, frames.as_deref(), config.as_deref(), format),

        Commands::Play {
            input,
            config,
            format,
        } => cli::play::execute(&input, config.as_deref(), format),

        Commands::Regions { config } => cli::regions::execute(config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
