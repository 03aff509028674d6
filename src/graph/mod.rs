//! Composable building blocks for constructing audio-processing graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with the ergonomics needed
//! for timbre design: event-local time, parameter curves, and block-based
//! rendering. The `extensions` module adds fluent helpers so each timbre
//! reads as a short, chainable signal path.

/// Multiply two signals together (amplitude or ring modulation).
pub mod amplify;
/// Gain curves rendered as signals.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.add()`, etc.).
pub mod extensions;
/// Topology-preserving filter node with automatable cutoff.
pub mod filter;
/// Two-operator frequency modulation.
pub mod fm;
/// Parallel layers summed at full level.
pub mod mix;
/// Core traits shared by all graph nodes.
pub mod node;
/// White and pink noise.
pub mod noise;
/// Audio-band oscillators.
pub mod oscillator;
/// Karplus-Strong plucked string.
pub mod pluck;
/// Serial chaining of two nodes (source → effect).
pub mod through;
