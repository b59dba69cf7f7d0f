//! CLI command implementations for War.

pub(crate) mod check;
pub(crate) mod missions;
pub(crate) mod play;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Output format for the `play` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON summary.
    Json,
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise the `-v` count picks the level.
pub(crate) fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<war::ConfigError> for CliError {
    fn from(e: war::ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<war::console::ConsoleError> for CliError {
    fn from(e: war::console::ConsoleError) -> Self {
        Self::new(e.to_string())
    }
}
