/*
Scales
======

Each scale maps the eight grid rows to eight pitches, top row first:

    row   major   minor   pentatonic ...
     0     C5      A5       A5
     1     B4      G5       G5
    ...
     7     C4      A4       E4

Changing the scale only swaps this table; the grid is untouched, so the same
pattern can be heard in a different mode at the press of a key.

Pitch names
-----------
Names are `<letter>[#|b]<octave>`. They are converted through the MIDI note
number (C4 = 60, A4 = 69) and 12-tone equal temperament:

    f = 440 · 2^((n - 69) / 12)
*/

use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scale {
    #[default]
    Major,
    Minor,
    Pentatonic,
    Blues,
    Chromatic,
    Dorian,
    Phrygian,
    Japanese,
}

impl Scale {
    pub const ALL: &'static [Scale] = &[
        Scale::Major,
        Scale::Minor,
        Scale::Pentatonic,
        Scale::Blues,
        Scale::Chromatic,
        Scale::Dorian,
        Scale::Phrygian,
        Scale::Japanese,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Scale::Major => "major",
            Scale::Minor => "minor",
            Scale::Pentatonic => "pentatonic",
            Scale::Blues => "blues",
            Scale::Chromatic => "chromatic",
            Scale::Dorian => "dorian",
            Scale::Phrygian => "phrygian",
            Scale::Japanese => "japanese",
        }
    }

    /// Pitch names, highest first.
    pub fn note_names(self) -> &'static [&'static str; 8] {
        match self {
            Scale::Major => &["C5", "B4", "A4", "G4", "F4", "E4", "D4", "C4"],
            Scale::Minor => &["A5", "G5", "F5", "E5", "D5", "C5", "B4", "A4"],
            Scale::Pentatonic => &["A5", "G5", "E5", "D5", "B4", "A4", "G4", "E4"],
            Scale::Blues => &["A5", "G5", "Eb5", "D5", "C5", "A4", "G4", "Eb4"],
            Scale::Chromatic => &["C5", "B4", "Bb4", "A4", "Ab4", "G4", "F#4", "F4"],
            Scale::Dorian => &["D5", "C5", "Bb4", "A4", "G4", "F4", "E4", "D4"],
            Scale::Phrygian => &["E5", "D5", "C5", "Bb4", "A4", "G4", "F4", "E4"],
            Scale::Japanese => &["B4", "A4", "E4", "D4", "C4", "B3", "A3", "E3"],
        }
    }

    pub fn note_name(self, row: usize) -> Option<&'static str> {
        self.note_names().get(row).copied()
    }

    /// Frequency of `row` in Hz. Rows past the table wrap around.
    pub fn frequency(self, row: usize) -> f32 {
        let names = self.note_names();
        // Table entries are all valid names
        pitch_to_freq(names[row % names.len()]).unwrap_or(440.0)
    }

    /// Frequencies for every row, highest first.
    pub fn frequencies(self) -> [f32; 8] {
        std::array::from_fn(|row| self.frequency(row))
    }

    pub fn next(self) -> Self {
        let i = self.index();
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = self.index();
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }
}

impl FromStr for Scale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|scale| scale.id() == s)
            .ok_or_else(|| Error::UnknownScale(s.to_string()))
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// MIDI note number for a name like `"F#4"` or `"Bb3"`.
pub fn note_number(name: &str) -> Option<i32> {
    let mut chars = name.chars();
    let semitone = match chars.next()? {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let rest = chars.as_str();
    let (accidental, octave) = match rest.as_bytes().first()? {
        b'#' => (1, &rest[1..]),
        b'b' => (-1, &rest[1..]),
        _ => (0, rest),
    };
    let octave: i32 = octave.parse().ok()?;

    Some(12 * (octave + 1) + semitone + accidental)
}

/// Equal-tempered frequency of a MIDI note, A4 (69) = 440 Hz.
pub fn midi_to_freq(note: i32) -> f32 {
    440.0 * 2f32.powf((note - 69) as f32 / 12.0)
}

/// Frequency of a pitch name, `None` if the name does not parse.
pub fn pitch_to_freq(name: &str) -> Option<f32> {
    note_number(name).map(midi_to_freq)
}
