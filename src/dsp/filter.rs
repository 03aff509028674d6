//! Topology-preserving (trapezoidal) state-variable filter.
//!
//! One pair of integrators yields lowpass, bandpass and highpass at once;
//! the response only picks which tap is returned. Damping is `k = 1 / Q`,
//! so Q = 0.707 is a flat Butterworth response and Q = 1 adds a small bump
//! at the cutoff.
//!
//! The prewarped coefficient `g = tan(π · fc / fs)` is cached and only
//! recomputed when the cutoff or sample rate changes.

use std::f32::consts::{FRAC_1_SQRT_2, PI};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

/// Lowest cutoff the coefficient is computed for, in Hz.
const MIN_CUTOFF: f32 = 10.0;
/// Highest cutoff as a fraction of the sample rate.
const MAX_CUTOFF_RATIO: f32 = 0.49;
const MIN_Q: f32 = 0.05;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    LowPass,
    HighPass,
    BandPass,
}

pub struct SVFilter {
    response: Response,
    cutoff_hz: f32,
    q: f32,

    // Integrator memories
    s1: f32,
    s2: f32,

    g: f32,
    g_key: Option<(f32, f32)>,
}

impl SVFilter {
    /// A filter with the flat Q of 0.707.
    pub fn new(response: Response, cutoff_hz: f32) -> Self {
        Self {
            response,
            cutoff_hz,
            q: FRAC_1_SQRT_2,
            s1: 0.0,
            s2: 0.0,
            g: 0.0,
            g_key: None,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(Response::LowPass, cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(Response::HighPass, cutoff_hz)
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(Response::BandPass, cutoff_hz)
    }

    pub fn with_q(mut self, q: f32) -> Self {
        self.set_q(q);
        self
    }

    pub fn response(&self) -> Response {
        self.response
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn q(&self) -> f32 {
        self.q
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz;
    }

    pub fn set_q(&mut self, q: f32) {
        self.q = q.max(MIN_Q);
    }

    #[inline]
    fn coefficient(&mut self, sample_rate: f32) -> f32 {
        let key = (self.cutoff_hz, sample_rate);
        if self.g_key != Some(key) {
            let cutoff = self
                .cutoff_hz
                .clamp(MIN_CUTOFF, sample_rate * MAX_CUTOFF_RATIO);
            self.g = (PI * cutoff / sample_rate).tan();
            self.g_key = Some(key);
        }
        self.g
    }

    /// Filter one sample at the current cutoff.
    #[inline]
    pub fn process(&mut self, input: f32, sample_rate: f32) -> f32 {
        let g = self.coefficient(sample_rate);
        let k = 1.0 / self.q;

        let band = (g * (input - self.s2) + self.s1) / (1.0 + g * (g + k));
        let low = self.s2 + g * band;
        self.s1 = 2.0 * band - self.s1;
        self.s2 = 2.0 * low - self.s2;

        match self.response {
            Response::LowPass => low,
            Response::BandPass => band,
            Response::HighPass => input - k * band - low,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample, ctx.sample_rate);
        }
    }

    pub fn reset(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
    }
}
