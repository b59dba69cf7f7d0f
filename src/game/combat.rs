//! Combat resolution.
//!
//! One battle round per attack: each side rolls a single die and the
//! attacker must roll strictly higher to conquer. Ties go to the defender.

use serde::Serialize;
use tracing::debug;

use crate::error::{GameError, GameResult};
use crate::game::{RandomSource, Territory};

/// Minimum troops a territory needs before it may attack.
pub const MIN_ATTACKING_TROOPS: u32 = 2;

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BattleOutcome {
    /// The attacker won and took the defending territory.
    Conquered,
    /// The defense held; the attacker lost one troop.
    Defended,
}

/// Result of a single battle, used for display.
///
/// The mutated territories remain the record of state; this is a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleReport {
    /// Attacking territory name.
    pub attacker: String,
    /// Defending territory name.
    pub defender: String,
    /// Attacker's die.
    pub attacker_roll: u8,
    /// Defender's die.
    pub defender_roll: u8,
    /// Battle outcome.
    pub outcome: BattleOutcome,
    /// Attacker troops after the battle.
    pub attacker_troops: u32,
    /// Defender troops after the battle.
    pub defender_troops: u32,
    /// Defender's color after the battle.
    pub defender_color: String,
}

/// Resolve one attack from `attacker` on `defender`.
///
/// Preconditions are checked in order and leave both territories untouched:
/// same color first, then fewer than [`MIN_ATTACKING_TROOPS`] troops. No dice
/// are drawn unless both pass.
///
/// On a conquest the defender takes the attacker's color and the floor half of
/// its troops; the attacker keeps the ceiling half. On a failed attack the
/// attacker loses one troop, which cannot underflow given the troop check.
///
/// # Errors
///
/// Returns [`GameError::SameFaction`] or [`GameError::InsufficientTroops`].
pub fn resolve_attack<R: RandomSource + ?Sized>(
    attacker: &mut Territory,
    defender: &mut Territory,
    dice: &mut R,
) -> GameResult<BattleReport> {
    if attacker.color == defender.color {
        return Err(GameError::SameFaction {
            attacker: attacker.name.clone(),
            defender: defender.name.clone(),
        });
    }
    if attacker.troops < MIN_ATTACKING_TROOPS {
        return Err(GameError::InsufficientTroops {
            territory: attacker.name.clone(),
            troops: attacker.troops,
        });
    }

    let attacker_roll = dice.roll_die();
    let defender_roll = dice.roll_die();

    let outcome = if attacker_roll > defender_roll {
        let moved = attacker.troops / 2;
        defender.color.clone_from(&attacker.color);
        defender.troops = moved;
        attacker.troops -= moved;
        BattleOutcome::Conquered
    } else {
        attacker.troops -= 1;
        BattleOutcome::Defended
    };

    debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        attacker_roll,
        defender_roll,
        ?outcome,
        "battle resolved"
    );

    Ok(BattleReport {
        attacker: attacker.name.clone(),
        defender: defender.name.clone(),
        attacker_roll,
        defender_roll,
        outcome,
        attacker_troops: attacker.troops,
        defender_troops: defender.troops,
        defender_color: defender.color.clone(),
    })
}
