//! Genre profiles driving the procedural generator.
//!
//! A profile is read-only configuration: a tempo range, the scale and timbre
//! the genre suggests, how busy each row should be, and how strongly hits lean
//! onto the downbeats.

use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{sequencing::scale::Scale, voices::Timbre, Error, Result};

/// Density used for rows the profile does not list.
pub const FALLBACK_DENSITY: f64 = 0.12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenreProfile {
    /// Inclusive BPM range the tempo is drawn from.
    pub tempo_range: (u32, u32),
    pub scale: Scale,
    pub timbre: Timbre,
    /// Hit probability per row, top row first.
    pub row_density: &'static [f64],
    /// Multiplier applied on columns divisible by 4.
    pub beat_bias: f64,
}

impl GenreProfile {
    pub fn density(&self, row: usize) -> f64 {
        self.row_density.get(row).copied().unwrap_or(FALLBACK_DENSITY)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    #[default]
    Action,
    Explore,
    Boss,
    Ambient,
    ChiptuneRetro,
    Dungeon,
    Victory,
}

static ACTION: GenreProfile = GenreProfile {
    tempo_range: (140, 180),
    scale: Scale::Minor,
    timbre: Timbre::Square,
    row_density: &[0.2, 0.15, 0.3, 0.1, 0.25, 0.35, 0.1, 0.2],
    beat_bias: 1.8,
};

static EXPLORE: GenreProfile = GenreProfile {
    tempo_range: (90, 115),
    scale: Scale::Pentatonic,
    timbre: Timbre::Pad,
    row_density: &[0.12, 0.1, 0.18, 0.12, 0.1, 0.18, 0.1, 0.12],
    beat_bias: 1.2,
};

static BOSS: GenreProfile = GenreProfile {
    tempo_range: (160, 200),
    scale: Scale::Phrygian,
    timbre: Timbre::Fm,
    row_density: &[0.3, 0.2, 0.4, 0.1, 0.3, 0.4, 0.2, 0.3],
    beat_bias: 2.0,
};

static AMBIENT: GenreProfile = GenreProfile {
    tempo_range: (60, 85),
    scale: Scale::Major,
    timbre: Timbre::Pad,
    row_density: &[0.08, 0.06, 0.1, 0.06, 0.08, 0.06, 0.05, 0.08],
    beat_bias: 1.0,
};

static CHIPTUNE_RETRO: GenreProfile = GenreProfile {
    tempo_range: (120, 160),
    scale: Scale::Major,
    timbre: Timbre::Pulse25,
    row_density: &[0.25, 0.2, 0.3, 0.15, 0.25, 0.2, 0.15, 0.25],
    beat_bias: 1.6,
};

static DUNGEON: GenreProfile = GenreProfile {
    tempo_range: (80, 110),
    scale: Scale::Dorian,
    timbre: Timbre::FmBass,
    row_density: &[0.1, 0.12, 0.1, 0.18, 0.15, 0.22, 0.2, 0.28],
    beat_bias: 1.5,
};

static VICTORY: GenreProfile = GenreProfile {
    tempo_range: (140, 165),
    scale: Scale::Major,
    timbre: Timbre::Chiptune,
    row_density: &[0.35, 0.25, 0.3, 0.2, 0.15, 0.2, 0.1, 0.15],
    beat_bias: 2.0,
};

impl Genre {
    pub const ALL: &'static [Genre] = &[
        Genre::Action,
        Genre::Explore,
        Genre::Boss,
        Genre::Ambient,
        Genre::ChiptuneRetro,
        Genre::Dungeon,
        Genre::Victory,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Genre::Action => "action",
            Genre::Explore => "explore",
            Genre::Boss => "boss",
            Genre::Ambient => "ambient",
            Genre::ChiptuneRetro => "chiptune_retro",
            Genre::Dungeon => "dungeon",
            Genre::Victory => "victory",
        }
    }

    pub fn profile(self) -> &'static GenreProfile {
        match self {
            Genre::Action => &ACTION,
            Genre::Explore => &EXPLORE,
            Genre::Boss => &BOSS,
            Genre::Ambient => &AMBIENT,
            Genre::ChiptuneRetro => &CHIPTUNE_RETRO,
            Genre::Dungeon => &DUNGEON,
            Genre::Victory => &VICTORY,
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&g| g == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl FromStr for Genre {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|genre| genre.id() == s)
            .ok_or_else(|| Error::UnknownGenre(s.to_string()))
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
