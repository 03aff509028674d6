//! Capabilities the synthesis engine and scheduler need from an audio target.
//!
//! Timbres only ever see [`OutputBus`]; the session additionally needs the
//! clock and the mixer. The same three are implemented by the in-process
//! [`SignalGraph`](crate::synth::SignalGraph) (offline bounce, tests) and by
//! the real-time [`GraphHandle`](crate::synth::GraphHandle).

use crate::synth::voice::VoiceEvent;

/// Where synthesized events go.
pub trait OutputBus {
    fn sample_rate(&self) -> f32;

    /// `false` while the output is suspended or not yet running. Events
    /// scheduled then are dropped.
    fn is_available(&self) -> bool;

    fn schedule(&mut self, event: VoiceEvent);
}

/// The audio clock events are scheduled against, in seconds.
pub trait AudioClock {
    fn current_time(&self) -> f64;
}

/// User-facing mix controls.
pub trait MixerControls {
    /// Master level, clamped to [0, 1].
    fn set_master_level(&mut self, level: f32);

    /// Reverb send, clamped to [0, 1]. See [`wet_dry_gains`].
    fn set_wet_dry_mix(&mut self, mix: f32);
}

/// Everything a [`Session`](crate::runtime::Session) drives.
pub trait AudioBackend: OutputBus + AudioClock + MixerControls {}

impl<T: OutputBus + AudioClock + MixerControls> AudioBackend for T {}

/// Map the wet/dry control to `(dry, wet)` gains.
///
/// The two are correlated rather than a crossfade: the dry path only dips to
/// 0.6 at full mix while the wet path rises to 0.45.
pub fn wet_dry_gains(mix: f32) -> (f32, f32) {
    let mix = mix.clamp(0.0, 1.0);
    (1.0 - mix * 0.4, mix * 0.45)
}
