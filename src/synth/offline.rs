//! Non-real-time rendering target.
//!
//! A bounce builds its own [`SignalGraph`] at [`BOUNCE_SAMPLE_RATE`], lets the
//! caller schedule events on it (through the same [`OutputBus`] the real-time
//! path uses), then renders the whole buffer in one go.

use crate::synth::{bus::OutputBus, graph::SignalGraph};

pub const BOUNCE_SAMPLE_RATE: f32 = 44_100.0;
/// Silence kept after the last step so decays and the reverb can ring out.
pub const BOUNCE_TAIL: f64 = 0.8;

/// A rendered mono buffer.
#[derive(Debug, Clone)]
pub struct Bounce {
    pub sample_rate: f32,
    pub samples: Vec<f32>,
}

impl Bounce {
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()))
    }
}

/// Render `length` seconds. `schedule` is called once, before any audio is
/// produced, with the offline graph as its bus.
pub fn bounce<F>(length: f64, master_level: f32, wet_dry_mix: f32, schedule: F) -> Bounce
where
    F: FnOnce(&mut dyn OutputBus),
{
    let mut graph = SignalGraph::new(BOUNCE_SAMPLE_RATE).with_levels(master_level, wet_dry_mix);
    schedule(&mut graph);

    let frames = (length.max(0.0) * BOUNCE_SAMPLE_RATE as f64).ceil() as usize;
    let mut samples = vec![0.0; frames];
    graph.render(&mut samples);

    Bounce {
        sample_rate: BOUNCE_SAMPLE_RATE,
        samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph::envelope::EnvNode, synth::voice::VoiceEvent};

    #[test]
    fn empty_bounce_is_silent() {
        let out = bounce(0.5, 0.7, 0.2, |_| {});
        assert_eq!(out.samples.len(), 22_050);
        assert_eq!(out.peak(), 0.0);
    }

    #[test]
    fn scheduled_events_land_at_their_time() {
        let out = bounce(1.0, 1.0, 0.0, |bus| {
            bus.schedule(VoiceEvent::new(0.5, 0.1, 440.0, Box::new(EnvNode::constant(0.5))));
        });

        let at = |t: f64| out.samples[(t * BOUNCE_SAMPLE_RATE as f64) as usize];
        assert_eq!(at(0.25), 0.0);
        assert!((at(0.55) - 0.5).abs() < 1e-6);
        assert!((out.duration() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn bounce_uses_the_live_mixer_mapping() {
        let out = bounce(0.1, 1.0, 1.0, |bus| {
            bus.schedule(VoiceEvent::new(0.0, 0.1, 440.0, Box::new(EnvNode::constant(1.0))));
        });

        // Before the first comb echo only the dry path sounds: 1 - 0.4 * mix
        let dry = &out.samples[..1_000];
        assert!(dry.iter().all(|&s| (s - 0.6).abs() < 1e-6), "got {}", dry[0]);
    }
}
