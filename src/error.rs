//! Error types for the conquest engine.

use std::fmt;

/// Errors raised by the territory registry, combat resolver and session controller.
///
/// Everything except [`GameError::AllocationFailure`] is recoverable: the
/// session reports it and returns to the prompt without mutating state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// No territory with this exact name exists.
    NotFound(String),
    /// Attacker and defender are controlled by the same color.
    SameFaction {
        /// Attacking territory name.
        attacker: String,
        /// Defending territory name.
        defender: String,
    },
    /// The attacker has fewer than two troops.
    InsufficientTroops {
        /// Attacking territory name.
        territory: String,
        /// Troops currently stationed there.
        troops: u32,
    },
    /// A menu or prompt answer outside the accepted set.
    InvalidOption(String),
    /// A command was issued after the session ended.
    SessionOver,
    /// Storage for the territory registry could not be reserved.
    AllocationFailure {
        /// Number of territories requested.
        requested: usize,
    },
}

impl GameError {
    /// Whether the session can carry on after this error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::AllocationFailure { .. })
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "territory not found: {name}"),
            Self::SameFaction { attacker, defender } => write!(
                f,
                "{attacker} cannot attack {defender}: both are held by the same color"
            ),
            Self::InsufficientTroops { territory, troops } => write!(
                f,
                "{territory} needs at least 2 troops to attack (has {troops})"
            ),
            Self::InvalidOption(input) => write!(f, "invalid option: {input}"),
            Self::SessionOver => write!(f, "the session has already ended"),
            Self::AllocationFailure { requested } => {
                write!(f, "failed to allocate a map of {requested} territories")
            }
        }
    }
}

impl std::error::Error for GameError {}

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;
