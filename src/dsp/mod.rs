//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free once constructed, making them safe to
//! embed directly inside scheduled voices. They stay focused on the
//! signal-processing math so graph nodes can layer on timing and routing.

/// Time-stamped parameter curves (set, linear and exponential ramps).
pub mod automation;
/// Feedback delay line for plucked-string synthesis.
pub mod delay;
/// One-shot envelope shapes built from automation curves.
pub mod envelope;
/// State-variable filter implementation with multiple responses.
pub mod filter;
/// White and pink noise sources.
pub mod noise;
/// Oscillator waveforms.
pub mod oscillator;
/// Schroeder reverb for the wet path of the signal graph.
pub mod reverb;

pub use automation::{Automation, Smoothed};
pub use noise::NoiseColor;
pub use oscillator::OscillatorWaveform;
