#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use war::{resolve_attack, BattleOutcome, LoadedDice, Territory};

/// Structured input for combat fuzzing.
#[derive(Arbitrary, Debug)]
struct CombatInput {
    /// Attacker troops.
    attacker_troops: u32,
    /// Defender troops.
    defender_troops: u32,
    /// Whether both sides fly the same color.
    same_color: bool,
    /// Raw values fed to the dice; clamped to die faces.
    rolls: [u32; 2],
}

fuzz_target!(|input: CombatInput| {
    let defender_color = if input.same_color { "Red" } else { "Blue" };
    let mut attacker = Territory::new("Origin", "Red", input.attacker_troops);
    let mut defender = Territory::new("Target", defender_color, input.defender_troops);
    let before = (attacker.clone(), defender.clone());
    let mut dice = LoadedDice::new(input.rolls);

    match resolve_attack(&mut attacker, &mut defender, &mut dice) {
        Ok(report) => {
            assert!(report.attacker_roll >= 1 && report.attacker_roll <= 6);
            assert!(report.defender_roll >= 1 && report.defender_roll <= 6);
            assert!(attacker.troops >= 1, "attacker left empty");
            match report.outcome {
                BattleOutcome::Conquered => {
                    assert!(report.attacker_roll > report.defender_roll);
                    assert_eq!(defender.color, attacker.color);
                    assert_eq!(
                        u64::from(attacker.troops) + u64::from(defender.troops),
                        u64::from(before.0.troops)
                    );
                }
                BattleOutcome::Defended => {
                    assert!(report.attacker_roll <= report.defender_roll);
                    assert_eq!(attacker.troops + 1, before.0.troops);
                    assert_eq!(defender, before.1);
                }
            }
        }
        Err(_) => {
            assert_eq!((attacker, defender), before, "rejected attack mutated state");
            assert_eq!(dice.draws(), 0);
        }
    }
});
