pub mod dsp;
pub mod engine; // Lookahead scheduling
pub mod error;
pub mod graph; // Composable audio graph nodes
pub mod io;
pub mod runtime; // Session wiring grid, scheduler and audio
pub mod sequencing; // Grid, scales and pattern generation
pub mod synth; // Signal graph and output buses
pub mod voices; // Timbre catalogue

pub use error::{Error, Result};

pub const MAX_BLOCK_SIZE: usize = 2048;
