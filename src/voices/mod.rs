//! The timbre catalogue.
//!
//! Every timbre is a plain function `(frequency, start_time, bus)` that builds
//! one or more short-lived node graphs and schedules them on the bus. Nothing
//! survives the call: each event carries its own oscillators, envelopes and
//! filters, and is dropped by the graph once its stop time passes.
//!
//! All parameter movement is expressed as curves relative to the event start
//! (see [`Automation`](crate::dsp::Automation)), so the same function works
//! for a trigger 120 ms in the future on the live graph and for a trigger
//! 3.5 s into an offline bounce.
//!
//! # Example
//!
//! ```ignore
//! use gridsynth::voices::{synthesize, Timbre};
//!
//! // A plucked A3, a quarter second from now
//! synthesize(Timbre::Karplus, 220.0, bus.current_time() + 0.25, &mut bus);
//! ```

mod additive;
mod basic;
mod bass;
mod fm;
mod hihat;
mod kick;
mod modulation;
mod noise;
mod pad;
mod pluck;
mod pulse;
mod sfx;
mod snare;

use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::{
    graph::node::GraphNode,
    synth::{bus::OutputBus, voice::VoiceEvent},
    Error, Result,
};

/// A synthesis algorithm: `(frequency_hz, start_time, bus)`.
pub type Algorithm = fn(f32, f64, &mut dyn OutputBus);

macro_rules! timbres {
    ($($variant:ident => $id:literal, $algorithm:path;)+) => {
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Timbre {
            $(
                #[cfg_attr(feature = "serde", serde(rename = $id))]
                $variant,
            )+
        }

        impl Timbre {
            pub const ALL: &'static [Timbre] = &[$(Timbre::$variant),+];

            /// Stable identifier, e.g. `"fm_bass"`.
            pub fn id(self) -> &'static str {
                match self {
                    $(Timbre::$variant => $id,)+
                }
            }

            pub fn algorithm(self) -> Algorithm {
                match self {
                    $(Timbre::$variant => $algorithm,)+
                }
            }
        }

        impl FromStr for Timbre {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($id => Ok(Timbre::$variant),)+
                    other => Err(Error::UnknownTimbre(other.to_string())),
                }
            }
        }
    };
}

timbres! {
    Sine => "sine", basic::sine;
    Square => "square", basic::square;
    Sawtooth => "sawtooth", basic::sawtooth;
    Triangle => "triangle", basic::triangle;
    Pulse25 => "pulse25", pulse::pulse25;
    Pulse12 => "pulse12", pulse::pulse12;
    Chiptune => "chiptune", additive::chiptune;
    FatSaw => "fatsaw", additive::fat_saw;
    SuperSquare => "supersquare", additive::super_square;
    Fm => "fm", fm::fm;
    FmBass => "fm_bass", fm::fm_bass;
    Am => "am", modulation::am;
    RingMod => "ringmod", modulation::ring_mod;
    Karplus => "karplus", pluck::karplus;
    NoiseWhite => "noise_white", noise::white;
    NoisePink => "noise_pink", noise::pink;
    Kick => "kick", kick::kick;
    Snare => "snare", snare::snare;
    HiHat => "hihat", hihat::hihat;
    Pad => "pad", pad::pad;
    Bass => "bass", bass::bass;
    Laser => "laser", sfx::laser;
    Coin => "coin", sfx::coin;
    Explosion => "explosion", sfx::explosion;
}

impl Default for Timbre {
    fn default() -> Self {
        Timbre::Square
    }
}

impl Timbre {
    /// Parse `id`, falling back to the default timbre when it is unknown.
    pub fn from_id_or_default(id: &str) -> Self {
        id.parse().unwrap_or_else(|err: Error| {
            warn!(%err, "falling back to {}", Timbre::default());
            Timbre::default()
        })
    }

    /// Next timbre in catalogue order, wrapping.
    pub fn next(self) -> Self {
        let index = self.index();
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Previous timbre in catalogue order, wrapping.
    pub fn prev(self) -> Self {
        let index = self.index();
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }
}

impl fmt::Display for Timbre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Oscillators keep running this long past the end of their envelope.
const STOP_PADDING: f64 = 0.01;

/// Put `node` on the bus for `duration` seconds from `start`.
fn play<N: GraphNode + 'static>(
    bus: &mut dyn OutputBus,
    start: f64,
    duration: f64,
    frequency: f32,
    node: N,
) {
    bus.schedule(VoiceEvent::new(start, duration, frequency, Box::new(node)));
}

/// Schedule one event, or report why it could not be.
pub fn try_synthesize(
    timbre: Timbre,
    frequency: f32,
    start_time: f64,
    bus: &mut dyn OutputBus,
) -> Result<()> {
    if !bus.is_available() {
        return Err(Error::AudioUnavailable);
    }
    (timbre.algorithm())(frequency, start_time, bus);
    Ok(())
}

/// Schedule one event. An unavailable bus turns this into a no-op.
pub fn synthesize(timbre: Timbre, frequency: f32, start_time: f64, bus: &mut dyn OutputBus) {
    if let Err(err) = try_synthesize(timbre, frequency, start_time, bus) {
        trace!(%err, %timbre, "trigger dropped");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::synth::{bus::OutputBus, voice::VoiceEvent};

    /// Bus that just keeps what it is given.
    pub struct RecordingBus {
        pub sample_rate: f32,
        pub available: bool,
        pub events: Vec<VoiceEvent>,
    }

    impl RecordingBus {
        pub fn new() -> Self {
            Self {
                sample_rate: 44_100.0,
                available: true,
                events: Vec::new(),
            }
        }
    }

    impl OutputBus for RecordingBus {
        fn sample_rate(&self) -> f32 {
            self.sample_rate
        }

        fn is_available(&self) -> bool {
            self.available
        }

        fn schedule(&mut self, event: VoiceEvent) {
            self.events.push(event);
        }
    }
}
