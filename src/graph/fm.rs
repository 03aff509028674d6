use crate::{
    dsp::{oscillator::OscillatorBlock, Automation},
    graph::node::{GraphNode, RenderCtx},
};

/*
Two-Operator FM
===============

A sine modulator drives the frequency of a sine carrier:

    modulator(t) = sin(2π · f·ratio · t)
    carrier freq = f + depth(t) · modulator(t)

`depth` is in Hz of deviation. It starts at f · ratio · index and glides
exponentially toward zero, so each hit opens bright and metallic and settles
toward a plain sine, the way a struck bar or an electric piano behaves.

    ratio 2, index 3      bell-like lead (fm)
    ratio 1, index 1.5    growl at half pitch (fm_bass)

With a large index the instantaneous carrier frequency dips below zero; the
oscillator just runs its phase backwards for those samples.
*/

pub struct FmNode {
    carrier: OscillatorBlock,
    modulator: OscillatorBlock,
    frequency: f32,
    ratio: f32,
    depth: Automation,
}

impl FmNode {
    /// Carrier at `frequency`, modulator at `frequency * ratio`, deviation
    /// gliding from `frequency * ratio * index` to near zero at `duration`.
    pub fn new(frequency: f32, ratio: f32, index: f32, duration: f64) -> Self {
        let peak = frequency * ratio * index;
        let depth = Automation::constant(peak)
            .set_value_at(0.0, peak)
            .exponential_ramp_to(0.001, duration);

        Self {
            carrier: OscillatorBlock::sine(),
            modulator: OscillatorBlock::sine(),
            frequency,
            ratio,
            depth,
        }
    }
}

impl GraphNode for FmNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let mod_freq = self.frequency * self.ratio;

        for (i, sample) in out.iter_mut().enumerate() {
            let deviation = self.depth.value_at(ctx.sample_time(i))
                * self.modulator.next_sample(mod_freq, ctx.sample_rate);
            *sample = self
                .carrier
                .next_sample(self.frequency + deviation, ctx.sample_rate);
        }
    }
}
