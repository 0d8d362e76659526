//! Per-player score counters
//!
//! Two counters, one per player slot, starting at zero. Scores only ever go
//! up; the visible display is external and is fed the fresh value on every
//! increment.

use std::fmt;

/// Number of player slots
pub const PLAYER_COUNT: usize = 2;

/// Score tracking error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreError {
    /// Player index outside `0..PLAYER_COUNT`
    OutOfRange { player: usize },
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::OutOfRange { player } => {
                write!(f, "player index {player} out of range (0..{PLAYER_COUNT})")
            }
        }
    }
}

impl std::error::Error for ScoreError {}

/// The ordered pair of player scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    totals: [u32; PLAYER_COUNT],
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one point to a player's counter and return the new total.
    /// Fails for indices other than 0 or 1; there is no decrement.
    pub fn increment(&mut self, player: usize) -> Result<u32, ScoreError> {
        let total = self
            .totals
            .get_mut(player)
            .ok_or(ScoreError::OutOfRange { player })?;
        *total += 1;
        Ok(*total)
    }

    pub fn get(&self, player: usize) -> Option<u32> {
        self.totals.get(player).copied()
    }

    /// Both totals in player order
    pub fn totals(&self) -> [u32; PLAYER_COUNT] {
        self.totals
    }
}
