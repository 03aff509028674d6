use crate::dsp::automation::Automation;

/*
One-Shot Envelopes
==================

Every grid hit is a self-contained event: it starts, shapes its volume, and
dies on its own. There is no gate and no note-off, so the classic ADSR state
machine collapses into a fixed curve decided when the event is created.

Vocabulary
----------

  floor     The starting level (0.001). Not exactly zero: exponential ramps
            need a non-zero start, and near-zero denormals are slow on some
            CPUs.

  silence   The level the decay aims for (0.0001, about -80 dB). Inaudible,
            but still a valid exponential target.

  attack    Linear rise from the floor to the peak. 6 ms for percussive
            hits - short enough to feel instant, long enough not to click.

  decay     Exponential fall from the peak to silence over the rest of the
            event. Exponential because that is how struck and plucked things
            actually die away.


The Shapes
----------

  percussive (used by nearly every timbre)

     peak ┤ ╱╲
          │╱  ╲__
    floor ┤      ‾‾──___
          └─┬───────────┬─→
          6 ms       duration

  decay (drums: the transient is in the source, not the gain)

     peak ┤╲
          │ ╲__
          │    ‾‾──___
          └───────────┬─→
                   duration

  swell (pads: a slow linear fade-in from true zero)

     peak ┤      ╱‾‾╲__
          │    ╱       ‾‾──__
        0 ┤──╱                ‾‾
          └──────┬───────────┬─→
               attack     duration
*/

/// Starting level of the percussive envelope.
pub const ENVELOPE_FLOOR: f32 = 0.001;
/// Level every envelope decays toward.
pub const SILENCE: f32 = 0.0001;
/// Attack time of the percussive envelope, in seconds.
pub const ATTACK_TIME: f64 = 0.006;

/// Floor → linear attack to `peak` → exponential decay to silence at `duration`.
pub fn percussive(peak: f32, duration: f64) -> Automation {
    Automation::constant(ENVELOPE_FLOOR)
        .set_value_at(0.0, ENVELOPE_FLOOR)
        .linear_ramp_to(peak, ATTACK_TIME)
        .exponential_ramp_to(SILENCE, duration.max(ATTACK_TIME * 2.0))
}

/// Instant `peak`, exponential decay to silence at `duration`.
pub fn decay(peak: f32, duration: f64) -> Automation {
    Automation::constant(peak)
        .set_value_at(0.0, peak)
        .exponential_ramp_to(SILENCE, duration)
}

/// Linear rise from zero over `attack`, exponential decay to silence at `duration`.
pub fn swell(peak: f32, attack: f64, duration: f64) -> Automation {
    Automation::constant(0.0)
        .set_value_at(0.0, 0.0)
        .linear_ramp_to(peak, attack)
        .exponential_ramp_to(SILENCE, duration)
}
