//! Tempo in beats per minute, with sixteenth-note steps.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const MIN_BPM: u32 = 40;
pub const MAX_BPM: u32 = 240;
pub const DEFAULT_BPM: u32 = 120;

/// Steps per beat. Every grid column is a sixteenth note.
pub const STEPS_PER_BEAT: u32 = 4;

/// A tempo always inside `[MIN_BPM, MAX_BPM]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tempo(u32);

impl Default for Tempo {
    fn default() -> Self {
        Self(DEFAULT_BPM)
    }
}

impl Tempo {
    /// Out-of-range values are clamped.
    pub fn new(bpm: u32) -> Self {
        Self(bpm.clamp(MIN_BPM, MAX_BPM))
    }

    pub fn bpm(self) -> u32 {
        self.0
    }

    /// Length of one step in seconds: `60 / bpm / 4`.
    pub fn step_duration(self) -> f64 {
        60.0 / self.0 as f64 / STEPS_PER_BEAT as f64
    }

    /// Length of one pass over `columns` steps.
    pub fn loop_duration(self, columns: usize) -> f64 {
        self.step_duration() * columns as f64
    }

    /// Shift by `delta` BPM, clamped.
    pub fn nudged(self, delta: i32) -> Self {
        Self::new(self.0.saturating_add_signed(delta))
    }
}

impl From<u32> for Tempo {
    fn from(bpm: u32) -> Self {
        Self::new(bpm)
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} BPM", self.0)
    }
}
