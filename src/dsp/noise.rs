//! Noise sources.
//!
//! White noise is uniform in [-1, 1). Pink noise runs the white signal through
//! Paul Kellet's refined filter: six leaky integrators at staggered rates plus
//! a direct term, summed for an approximately -3 dB/octave slope. The final
//! scale (0.11) brings the sum back into roughly the same range as white.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseColor {
    White,
    Pink,
}

#[derive(Debug, Default, Clone, Copy)]
struct PinkFilter {
    b: [f32; 7],
}

impl PinkFilter {
    #[inline]
    fn process(&mut self, white: f32) -> f32 {
        let b = &mut self.b;
        b[0] = 0.99886 * b[0] + white * 0.0555179;
        b[1] = 0.99332 * b[1] + white * 0.0750759;
        b[2] = 0.96900 * b[2] + white * 0.1538520;
        b[3] = 0.86650 * b[3] + white * 0.3104856;
        b[4] = 0.55000 * b[4] + white * 0.5329522;
        b[5] = -0.7616 * b[5] - white * 0.0168980;
        let out = (b[0] + b[1] + b[2] + b[3] + b[4] + b[5] + b[6] + white * 0.5362) * 0.11;
        b[6] = white * 0.115926;
        out
    }
}

pub struct NoiseSource {
    color: NoiseColor,
    rng: Pcg32,
    pink: PinkFilter,
}

impl NoiseSource {
    /// Noise with a fixed seed (reproducible output).
    pub fn seeded(color: NoiseColor, seed: u64) -> Self {
        Self {
            color,
            rng: Pcg32::seed_from_u64(seed),
            pink: PinkFilter::default(),
        }
    }

    /// Noise seeded from the thread-local generator.
    pub fn new(color: NoiseColor) -> Self {
        Self::seeded(color, rand::random())
    }

    pub fn color(&self) -> NoiseColor {
        self.color
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let white = self.rng.random_range(-1.0f32..1.0);
        match self.color {
            NoiseColor::White => white,
            NoiseColor::Pink => self.pink.process(white),
        }
    }

    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }
}
