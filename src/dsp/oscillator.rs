use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Phase-Accumulator Oscillator
============================

Every periodic waveform here is a function of a single number: the phase,
which runs from 0.0 up to (but never reaching) 1.0 once per cycle.

  phase increment per sample = frequency / sample_rate

At 440 Hz and 48 kHz the phase advances by ~0.00917 each sample and wraps
back to 0.0 about 440 times per second.

The waveforms are evaluated directly from the phase (no band-limiting). That
is the raw, slightly buzzy sound the retro timbres are after.

    Sine      sin(2π·phase)
    Square    +1 for the first half cycle, -1 for the second
    Sawtooth  ramps from -1 to +1 over the cycle
    Triangle  0 → +1 → -1 → 0, starting at zero like the sine

Negative frequencies are allowed (deep FM can push the instantaneous
frequency below zero). The phase then runs backwards and is wrapped with
`phase - floor(phase)`, which stays in [0, 1) for either direction.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorWaveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl OscillatorWaveform {
    /// Waveform value at `phase` (expected in [0, 1)).
    #[inline]
    pub fn value_at(self, phase: f32) -> f32 {
        match self {
            OscillatorWaveform::Sine => (TAU * phase).sin(),
            OscillatorWaveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            OscillatorWaveform::Sawtooth => 2.0 * phase - 1.0,
            OscillatorWaveform::Triangle => {
                if phase < 0.25 {
                    4.0 * phase
                } else if phase < 0.75 {
                    2.0 - 4.0 * phase
                } else {
                    4.0 * phase - 4.0
                }
            }
        }
    }
}

pub struct OscillatorBlock {
    waveform: OscillatorWaveform,
    phase: f32,
}

impl OscillatorBlock {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self { waveform, phase: 0.0 }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorWaveform::Sine)
    }

    pub fn square() -> Self {
        Self::new(OscillatorWaveform::Square)
    }

    pub fn sawtooth() -> Self {
        Self::new(OscillatorWaveform::Sawtooth)
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorWaveform::Triangle)
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.waveform
    }

    /// Emit the sample at the current phase, then advance by one sample.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let value = self.waveform.value_at(self.phase);
        self.phase += frequency / sample_rate;
        self.phase -= self.phase.floor();
        value
    }

    /// Fill `out` at a fixed frequency.
    pub fn render(&mut self, out: &mut [f32], frequency: f32, sample_rate: f32) {
        for sample in out.iter_mut() {
            *sample = self.next_sample(frequency, sample_rate);
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
