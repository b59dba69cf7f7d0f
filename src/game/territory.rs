//! Territory and registry types.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// A single territory on the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    /// Territory name, fixed after setup.
    pub name: String,
    /// Controlling color (the faction holding it).
    pub color: String,
    /// Troops stationed here.
    pub troops: u32,
}

impl Territory {
    /// Create a new territory.
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>, troops: u32) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            troops,
        }
    }

    /// Check whether this territory is held by `color`.
    #[must_use]
    #[inline]
    pub fn is_held_by(&self, color: &str) -> bool {
        self.color == color
    }
}

/// The fixed-size collection of territories for one session.
///
/// Registration order matters: it is the map order shown to players and the
/// order used for "consecutive territories" missions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    /// Territories in registration order.
    territories: Vec<Territory>,
}

impl Registry {
    /// Create a registry of `n` default territories to be filled in by setup.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::AllocationFailure`] if storage cannot be reserved.
    pub fn create(n: usize) -> GameResult<Self> {
        let mut territories = Vec::new();
        territories
            .try_reserve_exact(n)
            .map_err(|_| GameError::AllocationFailure { requested: n })?;
        territories.resize_with(n, Territory::default);
        Ok(Self { territories })
    }

    /// Create a registry from already populated territories.
    #[must_use]
    pub fn from_territories(territories: Vec<Territory>) -> Self {
        Self { territories }
    }

    /// Number of territories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.territories.len()
    }

    /// Whether the registry holds no territories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    /// Territories in registration order.
    #[must_use]
    #[inline]
    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    /// Iterate over territories in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Territory> {
        self.territories.iter()
    }

    /// Get a territory by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Territory> {
        self.territories.get(index)
    }

    /// Replace the territory at `index`.
    ///
    /// Returns `false` if the index is out of range.
    pub fn set(&mut self, index: usize, territory: Territory) -> bool {
        if let Some(slot) = self.territories.get_mut(index) {
            *slot = territory;
            true
        } else {
            false
        }
    }

    /// Find the index of the first territory named exactly `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] when no territory has that name.
    pub fn find_by_name(&self, name: &str) -> GameResult<usize> {
        self.territories
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| GameError::NotFound(name.to_string()))
    }

    /// Borrow two distinct territories mutably.
    ///
    /// Returns `None` if `a == b` or either index is out of range.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Territory, &mut Territory)> {
        if a == b || a >= self.territories.len() || b >= self.territories.len() {
            return None;
        }
        if a < b {
            let (left, right) = self.territories.split_at_mut(b);
            Some((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.territories.split_at_mut(a);
            Some((&mut right[0], &mut left[b]))
        }
    }

    /// Count territories held by `color`.
    #[must_use]
    pub fn count_with_color(&self, color: &str) -> usize {
        self.iter().filter(|t| t.is_held_by(color)).count()
    }

    /// Sum troops across territories held by `color`.
    #[must_use]
    pub fn troops_with_color(&self, color: &str) -> u64 {
        self.iter()
            .filter(|t| t.is_held_by(color))
            .map(|t| u64::from(t.troops))
            .sum()
    }

    /// Whether two neighbouring entries (in registration order) are both held by `color`.
    #[must_use]
    pub fn has_adjacent_pair(&self, color: &str) -> bool {
        self.territories
            .windows(2)
            .any(|w| w[0].is_held_by(color) && w[1].is_held_by(color))
    }

    /// Whether any territory is held by `color`.
    #[must_use]
    pub fn any_has_color(&self, color: &str) -> bool {
        self.iter().any(|t| t.is_held_by(color))
    }

    /// Whether every territory is held by `color`.
    ///
    /// Vacuously true for an empty registry.
    #[must_use]
    pub fn all_have_color(&self, color: &str) -> bool {
        self.iter().all(|t| t.is_held_by(color))
    }
}
