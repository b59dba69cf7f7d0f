// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! War: a turn-based territory conquest engine.
//!
//! Players register territories, each receives a secret mission, and attacks
//! are ordered between pairs of territories until a mission is fulfilled.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Console driver / CLI            │
//! ├─────────────────────────────────────┤
//! │     Session controller              │
//! ├──────────────────┬──────────────────┤
//! │  Combat resolver │  Mission engine  │
//! ├──────────────────┴──────────────────┤
//! │  Territory registry · Random source │
//! └─────────────────────────────────────┘
//! ```
//!
//! All randomness flows through one [`game::RandomSource`], so a seed plus
//! the console input reproduces a session exactly.

pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod render;

pub use config::{ConfigError, SessionConfig};
pub use error::{GameError, GameResult};

// Re-export key game types at crate root for convenience
pub use game::{
    BattleOutcome, BattleReport, BoundMission, LoadedDice, MissionCatalog, MissionKind, Player,
    RandomSource, Registry, SeededDice, Session, SessionState, Territory, bind, evaluate,
    resolve_attack,
};
