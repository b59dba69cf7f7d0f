//! Play command implementation.

use super::{CliError, OutputFormat};
use std::io;
use std::path::PathBuf;
use war::console::{self, Console};
use war::game::time_seed;
use war::{SeededDice, SessionConfig};

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the terminal fails, or
/// the map cannot be allocated.
pub(crate) fn execute(
    config: Option<PathBuf>,
    seed: Option<u64>,
    territories: Option<usize>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let mut config = match config {
        Some(path) => SessionConfig::load(&path)?,
        None => SessionConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    if let Some(territories) = territories {
        config.territories = territories;
    }
    config.validate()?;

    // Generate seed if not provided
    let seed = config.seed.unwrap_or_else(time_seed);
    let dice = SeededDice::from_seed(seed);

    if format == OutputFormat::Text {
        println!("Session seed: {seed}");
        println!();
    }

    let summary = {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut console = Console::new(stdin.lock(), stdout.lock());
        console::run(&mut console, &config, dice, Some(seed))?
    };

    let Some(summary) = summary else {
        return Ok(());
    };

    match format {
        OutputFormat::Text => {
            if let Some(winner) = &summary.winner {
                println!("Winner: {} after {} battles", winner.name, summary.battles);
            } else {
                println!("No winner after {} battles", summary.battles);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
