//! Text rendering for the console.

// Allow format! with push_str for readability
#![allow(clippy::format_push_string)]

use crate::error::GameError;
use crate::game::{BattleOutcome, BattleReport, MissionCatalog, Player, Registry, Victory};

/// Render the full map, one block per territory.
#[must_use]
pub fn render_map(registry: &Registry) -> String {
    let mut output = String::from("\n===== CURRENT MAP =====\n");
    for (i, territory) in registry.iter().enumerate() {
        output.push_str(&format!("\nTERRITORY {}:\n", i + 1));
        output.push_str(&format!("  Name: {}\n", territory.name));
        output.push_str(&format!("  Army color: {}\n", territory.color));
        output.push_str(&format!("  Troops: {}\n", territory.troops));
    }
    output
}

/// Render one battle.
#[must_use]
pub fn render_battle(report: &BattleReport) -> String {
    let mut output = format!(
        "\n{} (attacker) rolled: {}\n",
        report.attacker, report.attacker_roll
    );
    output.push_str(&format!(
        "{} (defender) rolled: {}\n",
        report.defender, report.defender_roll
    ));
    match report.outcome {
        BattleOutcome::Conquered => output.push_str(&format!(
            ">>> Attacker wins! {} conquers {} for {}.\n",
            report.attacker, report.defender, report.defender_color
        )),
        BattleOutcome::Defended => output.push_str(&format!(
            ">>> Defense holds! {} loses one troop.\n",
            report.attacker
        )),
    }
    output.push_str(&format!(
        "    {}: {} troops | {}: {} troops\n",
        report.attacker, report.attacker_troops, report.defender, report.defender_troops
    ));
    output
}

/// Render a player's mission.
#[must_use]
pub fn render_mission(player: &Player) -> String {
    format!(
        "\nMission for {} ({}): {}\n",
        player.name,
        player.color,
        player.mission().text()
    )
}

/// Render the victory banner.
#[must_use]
pub fn render_victory(victory: &Victory) -> String {
    format!(
        "\n*****************************************\n\
         VICTORY! {} fulfilled the mission:\n  {}\n\
         *****************************************\n",
        victory.name, victory.mission
    )
}

/// Render a recoverable error for the player.
#[must_use]
pub fn render_error(error: &GameError) -> String {
    format!("[ERROR] {error}\n")
}

/// Render the mission catalog.
#[must_use]
pub fn render_catalog(catalog: &MissionCatalog) -> String {
    let mut output = String::from("Missions:\n");
    for (i, template) in catalog.templates().iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, template.text()));
    }
    output
}
