//! Export collaborators.

pub mod wav;

pub use wav::{encode_wav, write_wav};
