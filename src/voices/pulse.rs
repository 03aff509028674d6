//! Pulse-width timbres.
//!
//! A narrow pulse is faked from two squares: the note itself, plus a second
//! square, inverted and slightly detuned, that cancels part of each high
//! half-cycle. The slow phase drift between the two sweeps the apparent duty
//! cycle, which gives the NES-style pulse its nasal shimmer. Only the note
//! square carries the envelope; the inverted layer holds a constant gain until
//! the voice stops.
//!
//! | duty  | inverted gain | detune   |
//! |-------|---------------|----------|
//! | 25 %  | -0.25         | 30 cents |
//! | 12.5% | -0.375        | 15 cents |

use crate::{
    graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode},
    synth::bus::OutputBus,
    voices::{play, STOP_PADDING},
};

const PEAK: f32 = 0.11;
const DURATION: f64 = 0.14;

fn pulse(freq: f32, duty: f32, start: f64, bus: &mut dyn OutputBus) {
    let main = OscNode::square()
        .with_frequency(freq)
        .amplify(EnvNode::percussive(PEAK, DURATION));

    let inverted = OscNode::square()
        .with_frequency(freq)
        .with_detune(duty * 120.0)
        .gain(-(1.0 - duty * 2.0) * 0.5);

    play(bus, start, DURATION + STOP_PADDING, freq, main.add(inverted));
}

pub fn pulse25(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    pulse(freq, 0.25, start, bus);
}

pub fn pulse12(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    pulse(freq, 0.125, start, bus);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::offline::bounce;

    #[test]
    fn narrower_duty_cancels_more() {
        // Where the two squares disagree the layers add up: 0.11 + |inverted gain|
        let wide = bounce(0.2, 1.0, 0.0, |bus| pulse25(220.0, 0.0, bus));
        let narrow = bounce(0.2, 1.0, 0.0, |bus| pulse12(220.0, 0.0, bus));
        assert!(wide.peak() > 0.0 && narrow.peak() > 0.0);
        assert!(narrow.peak() > wide.peak(), "inverted layer is louder for 12.5%");
    }

    #[test]
    fn inverted_layer_holds_its_level() {
        let out = bounce(0.2, 1.0, 0.0, |bus| pulse25(220.0, 0.0, bus));
        let at = |t: f64| (t * out.sample_rate as f64) as usize;

        // The note's envelope is spent by 120 ms, the inverted square is not
        let late = out.samples[at(0.12)..at(0.135)]
            .iter()
            .fold(0.0f32, |acc, &s| acc.max(s.abs()));
        assert!((late - 0.25).abs() < 0.03, "late level {late}");

        let after_stop = &out.samples[at(0.16)..];
        assert!(after_stop.iter().all(|&s| s == 0.0));
    }
}
