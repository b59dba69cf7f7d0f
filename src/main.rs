//! War CLI - play a territory conquest session on the terminal.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{ArgAction, Parser, Subcommand};
use std::process::ExitCode;

/// War - a turn-based territory conquest game
#[derive(Parser, Debug)]
#[command(name = "war")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log verbosity on stderr (-v info, -vv debug; RUST_LOG overrides)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play an interactive session on stdin/stdout
    Play {
        /// Session configuration file (JSON)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Random seed (default: derived from the clock)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of territories to register
        #[arg(short, long)]
        territories: Option<usize>,

        /// Output format for the end-of-session summary: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// List the mission catalog
    Missions,

    /// Validate a configuration file
    Check {
        /// Configuration file (JSON)
        #[arg(short, long)]
        config: std::path::PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_logging(args.verbose);

    let result = match args.command {
        Commands::Play {
            config,
            seed,
            territories,
            format,
        } => cli::play::execute(config, seed, territories, format),

        Commands::Missions => cli::missions::execute(),

        Commands::Check { config } => cli::check::execute(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
