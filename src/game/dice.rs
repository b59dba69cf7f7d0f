//! Random sources for dice rolls and mission draws.
//!
//! Every random draw in a session goes through one [`RandomSource`], in a
//! fixed order: mission picks during setup, then attacker and defender rolls
//! for each executed battle. Capturing the seed is enough to replay a session.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of faces on a combat die.
pub const DIE_FACES: u8 = 6;

/// A source of dice rolls and uniform picks.
pub trait RandomSource {
    /// Roll one die, returning a value in `1..=DIE_FACES`.
    fn roll_die(&mut self) -> u8;

    /// Pick a uniform index in `0..len`. Returns 0 when `len` is 0.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn roll_die(&mut self) -> u8 {
        (**self).roll_die()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn roll_die(&mut self) -> u8 {
        (**self).roll_die()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}

/// Seeded pseudo-random dice backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: StdRng,
    seed: u64,
}

impl SeededDice {
    /// Create dice from an explicit seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed these dice were created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededDice {
    fn roll_die(&mut self) -> u8 {
        self.rng.random_range(1..=DIE_FACES)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}

/// Derive a seed from the wall clock.
#[must_use]
pub fn time_seed() -> u64 {
    #[allow(clippy::cast_possible_truncation)]
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(42, |d| d.as_nanos() as u64)
}

/// Scripted random source that replays a fixed sequence of values.
///
/// Die rolls are clamped into `1..=DIE_FACES`; picks are taken modulo the
/// range. Once the script is exhausted, rolls return 1 and picks return 0.
#[derive(Debug, Clone, Default)]
pub struct LoadedDice {
    script: VecDeque<u32>,
    draws: usize,
}

impl LoadedDice {
    /// Create loaded dice that return `values` in order.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: values.into_iter().collect(),
            draws: 0,
        }
    }

    /// Number of values drawn so far.
    #[must_use]
    pub const fn draws(&self) -> usize {
        self.draws
    }

    /// Number of scripted values not yet drawn.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    fn next_value(&mut self) -> Option<u32> {
        self.draws += 1;
        self.script.pop_front()
    }
}

impl RandomSource for LoadedDice {
    fn roll_die(&mut self) -> u8 {
        self.next_value().map_or(1, |v| {
            #[allow(clippy::cast_possible_truncation)]
            let face = v.clamp(1, u32::from(DIE_FACES)) as u8;
            face
        })
    }

    fn pick_index(&mut self, len: usize) -> usize {
        match (self.next_value(), len) {
            (_, 0) | (None, _) => 0,
            (Some(v), len) => v as usize % len,
        }
    }
}
