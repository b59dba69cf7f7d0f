//! Player state management.

use serde::Serialize;

use crate::game::BoundMission;

/// A player in the session.
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    /// Display name.
    pub name: String,
    /// The color this player fights for.
    pub color: String,
    /// The player's secret mission.
    mission: BoundMission,
    /// Whether the mission has been shown to the player.
    mission_revealed: bool,
}

impl Player {
    /// Create a new player holding an unrevealed mission.
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>, mission: BoundMission) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            mission,
            mission_revealed: false,
        }
    }

    /// The player's mission.
    #[must_use]
    pub const fn mission(&self) -> &BoundMission {
        &self.mission
    }

    /// Whether the mission has been revealed.
    #[must_use]
    pub const fn mission_revealed(&self) -> bool {
        self.mission_revealed
    }

    /// Mark the mission as revealed.
    ///
    /// Returns `true` only on the first call.
    pub fn reveal_mission(&mut self) -> bool {
        let first = !self.mission_revealed;
        self.mission_revealed = true;
        first
    }
}
