use crate::{
    dsp::{filter::SVFilter, Automation},
    graph::node::{GraphNode, RenderCtx},
};

/*
Filter Node
===========

Wraps the state-variable filter with a cutoff that can move over the life
of an event. The cutoff is an Automation curve read at every sample's
event-local time:

    cutoff (Hz)
     900 ┤●
         │ ╲
         │   ╲__
     200 ┤      ‾‾‾‾‾‾‾‾────●
         └──────────────────┴──→ t
         0                 0.28 s

Three responses are available:

    lowpass    bass sweep, explosion rumble    (keeps below the cutoff)
    highpass   hi-hat sizzle at 9 kHz          (keeps above the cutoff)
    bandpass   a band around the cutoff

Q defaults to 0.707, the flattest passband. The timbres that use a filter
ask for Q = 1, which puts a slight bump at the cutoff and makes the bass
sweep audible as a "closing" sound.

Constant cutoffs skip the per-sample curve lookup.

    NoiseNode::white().through(FilterNode::lowpass(500.0).with_q(1.0))

    OscNode::sawtooth().through(FilterNode::lowpass_curve(
        Automation::constant(900.0).exponential_ramp_to(200.0, 0.28),
    ))
*/

pub struct FilterNode {
    filter: SVFilter,
    cutoff: Automation,
}

impl FilterNode {
    fn new(filter: SVFilter, cutoff: Automation) -> Self {
        Self { filter, cutoff }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(SVFilter::lowpass(cutoff_hz), Automation::constant(cutoff_hz))
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(SVFilter::highpass(cutoff_hz), Automation::constant(cutoff_hz))
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(SVFilter::bandpass(cutoff_hz), Automation::constant(cutoff_hz))
    }

    /// Lowpass whose cutoff follows `curve` over the event.
    pub fn lowpass_curve(curve: Automation) -> Self {
        let start = curve.value_at(0.0);
        Self::new(SVFilter::lowpass(start), curve)
    }

    pub fn with_q(mut self, q: f32) -> Self {
        self.filter.set_q(q);
        self
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if self.cutoff.is_constant() {
            self.filter.render(out, ctx);
            return;
        }

        for (i, sample) in out.iter_mut().enumerate() {
            self.filter.set_cutoff(self.cutoff.value_at(ctx.sample_time(i)));
            *sample = self.filter.process(*sample, ctx.sample_rate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{extensions::NodeExt, oscillator::OscNode};

    fn rms(buffer: &[f32]) -> f32 {
        (buffer.iter().map(|x| x * x).sum::<f32>() / buffer.len() as f32).sqrt()
    }

    #[test]
    fn highpass_removes_low_tone() {
        let ctx = RenderCtx::from_freq(44_100.0, 100.0);
        let mut dry = OscNode::sine();
        let mut wet = OscNode::sine().through(FilterNode::highpass(9_000.0));

        let mut a = vec![0.0; 2048];
        let mut b = vec![0.0; 2048];
        dry.render_block(&mut a, &ctx);
        wet.render_block(&mut b, &ctx);

        assert!(rms(&b) < rms(&a) * 0.01, "dry={}, wet={}", rms(&a), rms(&b));
    }

    #[test]
    fn closing_cutoff_darkens_over_time() {
        let sample_rate = 44_100.0;
        let curve = Automation::constant(900.0)
            .set_value_at(0.0, 900.0)
            .exponential_ramp_to(200.0, 0.28);
        let mut voice = OscNode::sawtooth()
            .with_frequency(440.0)
            .through(FilterNode::lowpass_curve(curve));

        let ctx = RenderCtx::from_freq(sample_rate, 440.0);
        let mut early = vec![0.0; 2048];
        let mut late = vec![0.0; 2048];
        voice.render_block(&mut early, &ctx);
        voice.render_block(&mut late, &ctx.at(0.25));

        assert!(rms(&late) < rms(&early), "filter should close");
    }
}
