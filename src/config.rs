//! Session configuration.
//!
//! Configuration is optional: every field has a default matching the classic
//! five-territory game. A JSON file may override any subset of fields and may
//! carry a complete setup, skipping the interactive registration prompts.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::Territory;

/// Default number of territories on the map.
pub const DEFAULT_TERRITORIES: usize = 5;

/// Default player bounds.
pub const DEFAULT_MIN_PLAYERS: usize = 2;
/// Default maximum player count.
pub const DEFAULT_MAX_PLAYERS: usize = 5;

/// Characters kept from a territory or player name.
pub const DEFAULT_NAME_CAPACITY: usize = 29;

/// Characters kept from a color.
pub const DEFAULT_COLOR_CAPACITY: usize = 9;

/// A player entry in a prepared setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    /// Player name.
    pub name: String,
    /// Player color.
    pub color: String,
}

/// A prepared map and roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupSpec {
    /// Territories in map order.
    pub territories: Vec<Territory>,
    /// Players in registration order.
    pub players: Vec<PlayerSpec>,
}

/// Parameters of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of territories registered interactively.
    pub territories: usize,
    /// Fewest players allowed.
    pub min_players: usize,
    /// Most players allowed.
    pub max_players: usize,
    /// Characters kept from names.
    pub name_capacity: usize,
    /// Characters kept from colors.
    pub color_capacity: usize,
    /// Refuse a territory color already used by an earlier territory during setup.
    pub unique_territory_colors: bool,
    /// Fixed seed; derived from the clock when absent.
    pub seed: Option<u64>,
    /// Prepared map and roster.
    pub setup: Option<SetupSpec>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            territories: DEFAULT_TERRITORIES,
            min_players: DEFAULT_MIN_PLAYERS,
            max_players: DEFAULT_MAX_PLAYERS,
            name_capacity: DEFAULT_NAME_CAPACITY,
            color_capacity: DEFAULT_COLOR_CAPACITY,
            unique_territory_colors: false,
            seed: None,
            setup: None,
        }
    }
}

/// Error loading or validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The file is not valid configuration JSON.
    Json(serde_json::Error),
    /// A value is out of range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read configuration: {e}"),
            Self::Json(e) => write!(f, "malformed configuration: {e}"),
            Self::Invalid(reason) => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl SessionConfig {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse and validate configuration JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.territories == 0 {
            return Err(ConfigError::Invalid("the map needs at least one territory".into()));
        }
        if self.min_players == 0 || self.min_players > self.max_players {
            return Err(ConfigError::Invalid(format!(
                "player bounds {}..={} are empty",
                self.min_players, self.max_players
            )));
        }
        if self.name_capacity == 0 || self.color_capacity == 0 {
            return Err(ConfigError::Invalid("capacities must be at least 1".into()));
        }
        if let Some(setup) = &self.setup {
            if setup.territories.is_empty() {
                return Err(ConfigError::Invalid("setup has no territories".into()));
            }
            let players = setup.players.len();
            if players < self.min_players || players > self.max_players {
                return Err(ConfigError::Invalid(format!(
                    "setup has {players} players, expected {}..={}",
                    self.min_players, self.max_players
                )));
            }
            if self.unique_territory_colors {
                for (i, territory) in setup.territories.iter().enumerate() {
                    let color = self.clip_color(&territory.color);
                    if let Some(earlier) = setup.territories[..i]
                        .iter()
                        .find(|t| self.clip_color(&t.color) == color)
                    {
                        return Err(ConfigError::Invalid(format!(
                            "color {color} of {} is already used by {}",
                            territory.name, earlier.name
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Number of territories the session will have.
    #[must_use]
    pub fn registry_size(&self) -> usize {
        self.setup
            .as_ref()
            .map_or(self.territories, |s| s.territories.len())
    }

    /// Whether `count` players is allowed.
    #[must_use]
    pub fn players_allowed(&self, count: usize) -> bool {
        (self.min_players..=self.max_players).contains(&count)
    }

    /// Cut a name down to the name capacity.
    #[must_use]
    pub fn clip_name(&self, name: &str) -> String {
        truncate_chars(name, self.name_capacity)
    }

    /// Cut a color down to the color capacity.
    #[must_use]
    pub fn clip_color(&self, color: &str) -> String {
        truncate_chars(color, self.color_capacity)
    }
}

/// Keep at most `max` characters of `text`.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
