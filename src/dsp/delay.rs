//! Averaging feedback delay line (Karplus-Strong).

/*
Plucked String by Delay Line
============================

A plucked string can be faked without any oscillator:

  1. Fill a delay line with one period's worth of white noise.
  2. Read the oldest sample out.
  3. Write back the average of it and its neighbour.

    ┌───────────── delay line (length L) ─────────────┐
    │ n0  n1  n2  ...                          nL-1   │ ──→ out
    └──────────────────────────────────────────────────┘
        ↑                                    │
        └──── 0.5 · (y[n-L] + y[n-L+1]) ←────┘

Because the same samples come around every L steps the output is periodic
with pitch sample_rate / L. The 2-tap average is a gentle lowpass, so each
trip round the loop loses a little high end: the noise burst turns into a
mellow tone that dies away, exactly like a real string.

The line length is rounded up, so the pitch lands at or just below the
requested frequency.
*/

use rand::Rng;

pub struct FeedbackDelay {
    buffer: Vec<f32>,
    read_pos: usize,
}

impl FeedbackDelay {
    /// A silent line of `len` samples (at least 2, the averaging filter needs a neighbour).
    pub fn new(len: usize) -> Self {
        Self {
            buffer: vec![0.0; len.max(2)],
            read_pos: 0,
        }
    }

    /// Line length giving `frequency` at `sample_rate`: `ceil(sample_rate / frequency)`.
    pub fn length_for(frequency: f32, sample_rate: f32) -> usize {
        if frequency <= 0.0 {
            return 2;
        }
        ((sample_rate / frequency).ceil() as usize).max(2)
    }

    /// Excite the line with uniform white noise.
    pub fn pluck<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for sample in self.buffer.iter_mut() {
            *sample = rng.random_range(-1.0f32..1.0);
        }
        self.read_pos = 0;
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let len = self.buffer.len();
        let next_pos = (self.read_pos + 1) % len;

        let out = self.buffer[self.read_pos];
        self.buffer[self.read_pos] = 0.5 * (out + self.buffer[next_pos]);
        self.read_pos = next_pos;

        out
    }

    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.read_pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn length_rounds_up() {
        assert_eq!(FeedbackDelay::length_for(220.0, 44_100.0), 201);
        assert_eq!(FeedbackDelay::length_for(441.0, 44_100.0), 100);
    }

    #[test]
    fn first_period_is_the_excitation() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut line = FeedbackDelay::new(8);
        line.pluck(&mut rng);
        let seeded = line.buffer.clone();

        for expected in seeded {
            assert_eq!(line.next_sample(), expected);
        }
    }

    #[test]
    fn second_period_is_averaged() {
        let mut line = FeedbackDelay::new(4);
        line.buffer.copy_from_slice(&[1.0, 0.0, -1.0, 0.5]);

        let first: Vec<f32> = (0..4).map(|_| line.next_sample()).collect();
        let second: Vec<f32> = (0..4).map(|_| line.next_sample()).collect();

        assert_eq!(first, vec![1.0, 0.0, -1.0, 0.5]);
        // y[n] = 0.5 * (y[n-4] + y[n-3]); the last tap wraps onto the freshly written y[4]
        assert_eq!(second, vec![0.5, -0.5, -0.25, 0.5]);
    }

    #[test]
    fn energy_decays() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut line = FeedbackDelay::new(100);
        line.pluck(&mut rng);

        let mut early = vec![0.0; 1000];
        let mut late = vec![0.0; 1000];
        line.render(&mut early);
        for _ in 0..20 {
            line.render(&mut late);
        }

        let energy = |b: &[f32]| b.iter().map(|x| x * x).sum::<f32>();
        assert!(energy(&late) < energy(&early) * 0.5);
    }
}
