//! Schroeder reverb for the wet path of the signal graph.
//!
//! Four damped feedback combs run in parallel and their average feeds two
//! allpass diffusers in series:
//!
//! ```text
//!          ┌─ comb 29.7 ms ─┐
//!          ├─ comb 37.1 ms ─┤
//!   in ────┼─ comb 41.1 ms ─┼── avg ── allpass 5.0 ms ── allpass 1.7 ms ── out
//!          └─ comb 43.7 ms ─┘
//! ```
//!
//! The tail length is set as RT60. A comb of loop length `d` seconds must
//! lose 60 dB after `rt60` seconds, which gives each comb its own gain
//! `g = 10^(-3·d / rt60)`. Buffers are sized from the sample rate once, in
//! [`Reverb::new`].

/// Comb delay times in ms (mutually prime ratios).
const COMB_DELAYS_MS: [f32; 4] = [29.7, 37.1, 41.1, 43.7];
/// Allpass delay times in ms.
const ALLPASS_DELAYS_MS: [f32; 2] = [5.0, 1.7];

/// Default tail length in seconds.
pub const DEFAULT_DECAY: f32 = 2.5;

fn ms_to_samples(ms: f32, sample_rate: f32) -> usize {
    ((ms * sample_rate / 1000.0) as usize).max(1)
}

/// A damped feedback comb filter.
pub struct CombFilter {
    buffer: Vec<f32>,
    write_pos: usize,
    feedback: f32,
    damp: f32,
    filter_state: f32,
}

impl CombFilter {
    pub fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)],
            write_pos: 0,
            feedback: 0.5,
            damp: 0.2,
            filter_state: 0.0,
        }
    }

    pub fn delay_samples(&self) -> usize {
        self.buffer.len()
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.99);
    }

    pub fn set_damp(&mut self, damp: f32) {
        self.damp = damp.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.buffer[self.write_pos];

        // One-pole lowpass in the loop: highs die faster than lows
        self.filter_state = output * (1.0 - self.damp) + self.filter_state * self.damp;
        self.buffer[self.write_pos] = input + self.filter_state * self.feedback;

        self.write_pos = (self.write_pos + 1) % self.buffer.len();
        output
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.filter_state = 0.0;
        self.write_pos = 0;
    }
}

/// A Schroeder allpass stage for diffusion.
pub struct AllpassFilter {
    buffer: Vec<f32>,
    write_pos: usize,
    feedback: f32,
}

impl AllpassFilter {
    pub fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)],
            write_pos: 0,
            feedback: 0.5,
        }
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.9);
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.buffer[self.write_pos];
        let output = -self.feedback * input + delayed;
        self.buffer[self.write_pos] = input + self.feedback * output;

        self.write_pos = (self.write_pos + 1) % self.buffer.len();
        output
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

pub struct Reverb {
    combs: [CombFilter; 4],
    allpasses: [AllpassFilter; 2],
    sample_rate: f32,
    decay: f32,
}

impl Reverb {
    /// A reverb with a [`DEFAULT_DECAY`] tail.
    pub fn new(sample_rate: f32) -> Self {
        let combs = COMB_DELAYS_MS.map(|ms| CombFilter::new(ms_to_samples(ms, sample_rate)));
        let allpasses =
            ALLPASS_DELAYS_MS.map(|ms| AllpassFilter::new(ms_to_samples(ms, sample_rate)));

        let mut reverb = Self {
            combs,
            allpasses,
            sample_rate,
            decay: DEFAULT_DECAY,
        };
        reverb.set_decay(DEFAULT_DECAY);
        reverb
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn decay(&self) -> f32 {
        self.decay
    }

    /// Set the RT60 tail length in seconds.
    pub fn set_decay(&mut self, seconds: f32) {
        self.decay = seconds.max(0.05);
        for comb in &mut self.combs {
            let delay = comb.delay_samples() as f32 / self.sample_rate;
            comb.set_feedback(10f32.powf(-3.0 * delay / self.decay));
        }
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let mut output = 0.0;
        for comb in &mut self.combs {
            output += comb.process(input);
        }
        output *= 0.25;

        for allpass in &mut self.allpasses {
            output = allpass.process(output);
        }
        output
    }

    pub fn reset(&mut self) {
        for comb in &mut self.combs {
            comb.reset();
        }
        for allpass in &mut self.allpasses {
            allpass.reset();
        }
    }
}
