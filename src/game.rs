//! Game layer.
//!
//! Implements the rules of a conquest session:
//! - Territory registry (name, controlling color, troops)
//! - Single-die combat resolution
//! - Mission catalog, binding and evaluation
//! - Session state machine driving turns

mod combat;
mod dice;
mod mission;
mod player;
mod session;
mod territory;

pub use combat::{BattleOutcome, BattleReport, MIN_ATTACKING_TROOPS, resolve_attack};
pub use dice::{DIE_FACES, LoadedDice, RandomSource, SeededDice, time_seed};
pub use mission::{
    BoundMission, COLOR_PLACEHOLDER, MissionCatalog, MissionKind, MissionTemplate, TERRITORY_GOAL,
    TROOP_GOAL, bind, evaluate,
};
pub use player::Player;
pub use session::{
    AttackTurn, MenuChoice, MenuOutcome, Session, SessionState, SessionSummary, Victory,
};
pub use territory::{Registry, Territory};
