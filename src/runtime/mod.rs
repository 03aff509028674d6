//! Application runtime: the [`Session`] that ties pattern, scheduler and
//! audio backend together.

pub mod session;

pub use session::{step_label, Session, SessionConfig, RANDOMIZE_OTHER, RANDOMIZE_STRONG};
