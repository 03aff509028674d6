/*
Procedural Pattern Generator
============================

Independent coin flips per cell give patterns with no sense of phrasing. The
generator instead builds a call and response:

    columns:   0 ........ half-1 | half ........ columns-1
               ────── call ──────┼────── response ──────
               weighted random   │  mirror of the call
                                 │  with variations

1. Call. Each cell in the first half is a Bernoulli trial with probability
   `density(row)`, multiplied by `beat_bias` on columns divisible by 4 and by
   1.3 on the remaining even columns.

2. Response. Column `c` looks back at `c - half` in the same row:

       source on:   roll < 0.78          → cell on
                    0.78 ≤ roll < 0.88   → the row above gets the hit instead
                    otherwise            → off
       source off:  on with probability density × 0.25 (fills)

   The "row above" moves are collected as `RegisterShift`s and written after
   every row has been visited. A row is never read again once it has been
   processed, so deferring the writes leaves the result unchanged.

3. Guarantees. The two lowest rows always hit column 0 (and column 8 when the
   grid is wide enough); each of the three highest rows ends with at least
   two hits, forcing column 0 and column `columns / 4` if it falls short.

All randomness comes from the caller's RNG, so a seeded `Pcg32` reproduces a
pattern exactly.
*/

use rand::Rng;
use tracing::debug;

use crate::{
    sequencing::{genre::GenreProfile, grid::Grid, scale::Scale, tempo::Tempo},
    voices::Timbre,
};

/// Probability a response cell copies an active call cell.
const MIRROR_KEEP: f64 = 0.78;
/// Upper edge of the band where the hit moves one row up.
const MIRROR_SHIFT: f64 = 0.88;
/// Multiplier on non-downbeat even columns.
const OFFBEAT_BIAS: f64 = 1.3;
/// Fraction of the row density used for fills.
const FILL_FACTOR: f64 = 0.25;

/// Number of rows at the top that must carry a melody.
const MELODY_ROWS: usize = 3;
const MIN_MELODY_HITS: usize = 2;
/// Bass anchor column besides 0.
const BASS_ANCHOR: usize = 8;

/// A generated pattern plus the settings the genre suggests for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub grid: Grid,
    pub tempo: Tempo,
    pub scale: Scale,
    pub timbre: Timbre,
}

/// A response hit moved up to `row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RegisterShift {
    row: usize,
    col: usize,
}

/// Draw a tempo from `[min, max]`: `floor(min + U · (max - min))`.
fn pick_tempo<R: Rng + ?Sized>(range: (u32, u32), rng: &mut R) -> Tempo {
    let (min, max) = range;
    let span = max.saturating_sub(min) as f64;
    let bpm = (min as f64 + rng.random::<f64>() * span).floor() as u32;
    Tempo::new(bpm)
}

/// Generate a `rows` × `columns` pattern for `profile`.
pub fn generate<R: Rng + ?Sized>(
    profile: &GenreProfile,
    rows: usize,
    columns: usize,
    rng: &mut R,
) -> Generated {
    let tempo = pick_tempo(profile.tempo_range, rng);
    let mut grid = Grid::new(rows, columns);
    let rows = grid.rows();
    let columns = grid.columns();
    let half = columns / 2;

    let mut shifts = Vec::new();

    for row in 0..rows {
        let density = profile.density(row);

        for col in 0..half {
            let mut p = density;
            if col % 4 == 0 {
                p *= profile.beat_bias;
            } else if col % 2 == 0 {
                p *= OFFBEAT_BIAS;
            }
            grid.set(row, col, rng.random::<f64>() < p);
        }

        for col in half..columns {
            if grid.get(row, col - half) {
                let roll = rng.random::<f64>();
                if roll < MIRROR_KEEP {
                    grid.set(row, col, true);
                } else if roll < MIRROR_SHIFT && row > 0 {
                    shifts.push(RegisterShift { row: row - 1, col });
                }
            } else if rng.random::<f64>() < density * FILL_FACTOR {
                grid.set(row, col, true);
            }
        }
    }

    for shift in &shifts {
        grid.set(shift.row, shift.col, true);
    }

    apply_guarantees(&mut grid);

    debug!(
        bpm = tempo.bpm(),
        scale = %profile.scale,
        timbre = %profile.timbre,
        hits = grid.active_count(),
        shifts = shifts.len(),
        "generated pattern"
    );

    Generated {
        grid,
        tempo,
        scale: profile.scale,
        timbre: profile.timbre,
    }
}

/// Bass anchors and the melody floor.
fn apply_guarantees(grid: &mut Grid) {
    let rows = grid.rows();
    let columns = grid.columns();

    for row in rows.saturating_sub(2)..rows {
        grid.set(row, 0, true);
        if columns > BASS_ANCHOR {
            grid.set(row, BASS_ANCHOR, true);
        }
    }

    for row in 0..MELODY_ROWS.min(rows) {
        if grid.active_count_in_row(row) < MIN_MELODY_HITS {
            grid.set(row, 0, true);
            grid.set(row, columns / 4, true);
        }
    }
}
