//! Output side of the engine: where synthesized events are mixed and heard.
//!
//! The [`SignalGraph`] is the only mixing topology. It runs in-process for
//! offline bounces and tests, or behind a lock-free queue on the audio thread
//! ([`RealtimeGraph`] + [`GraphHandle`]).

pub mod bus;
pub mod graph;
pub mod offline;
#[cfg(feature = "rtrb")]
pub mod realtime;
pub mod voice;

pub use bus::{wet_dry_gains, AudioBackend, AudioClock, MixerControls, OutputBus};
pub use graph::SignalGraph;
pub use offline::{bounce, Bounce};
#[cfg(feature = "rtrb")]
pub use realtime::{GraphHandle, RealtimeGraph};
pub use voice::VoiceEvent;
