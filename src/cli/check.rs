//! Configuration check command implementation.

use super::CliError;
use std::path::PathBuf;
use war::SessionConfig;

/// Execute the check command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is invalid.
pub(crate) fn execute(config: PathBuf) -> Result<(), CliError> {
    println!("Checking: {}", config.display());
    println!();

    let loaded = SessionConfig::load(&config);
    print_check("Configuration loads and validates", loaded.is_ok());
    let loaded = loaded?;

    println!();
    println!("Summary:");
    println!("  Territories:  {}", loaded.registry_size());
    println!(
        "  Players:      {}-{}",
        loaded.min_players, loaded.max_players
    );
    println!(
        "  Capacities:   name {} / color {} characters",
        loaded.name_capacity, loaded.color_capacity
    );
    println!(
        "  Unique colors: {}",
        if loaded.unique_territory_colors { "required" } else { "not required" }
    );
    match loaded.seed {
        Some(seed) => println!("  Seed:         {seed}"),
        None => println!("  Seed:         from clock"),
    }
    match &loaded.setup {
        Some(setup) => println!(
            "  Setup:        prepared ({} territories, {} players)",
            setup.territories.len(),
            setup.players.len()
        ),
        None => println!("  Setup:        interactive"),
    }

    println!();
    println!("Configuration is valid!");
    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
