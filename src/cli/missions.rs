//! Missions command implementation.

use super::CliError;
use war::MissionCatalog;
use war::render::render_catalog;

/// Execute the missions command.
///
/// # Errors
///
/// Never fails; the signature matches the other commands.
pub(crate) fn execute() -> Result<(), CliError> {
    let catalog = MissionCatalog::standard();
    print!("{}", render_catalog(&catalog));
    println!();
    println!("{{color}} is replaced by the player's own color when the mission is dealt.");
    Ok(())
}
