use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Multiply a signal by a modulator, sample by sample.
///
/// With an [`EnvNode`](crate::graph::envelope::EnvNode) as modulator this is a
/// VCA; with an audio-rate oscillator it is ring modulation.
pub struct Amplify<N, M> {
    pub signal: N,
    pub modulator: M,
    temp_buffer: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self {
            signal,
            modulator,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.signal.render_block(out, ctx);

        // Slice temp buffer to match output size (RT-safe, no allocation)
        let frames = &mut self.temp_buffer[..out.len()];
        frames.fill(0.0);
        self.modulator.render_block(frames, ctx);

        for (o, m) in out.iter_mut().zip(frames.iter()) {
            *o *= *m;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode};

    #[test]
    fn scales_signal_by_modulator() {
        let mut node = OscNode::square().amplify(EnvNode::constant(0.25));
        let mut buffer = vec![0.0; 64];
        node.render_block(&mut buffer, &RenderCtx::from_freq(48_000.0, 440.0));
        assert!(buffer.iter().all(|&s| (s.abs() - 0.25).abs() < 1e-6));
    }

    #[test]
    fn ring_modulation_produces_sign_flips() {
        // A constant-positive carrier times a sine goes negative half the time
        let mut node = OscNode::square()
            .with_frequency(1.0)
            .amplify(OscNode::sine().with_frequency(100.0));
        let mut buffer = vec![0.0; 400];
        node.render_block(&mut buffer, &RenderCtx::from_freq(4_000.0, 440.0));

        let negative = buffer.iter().filter(|&&s| s < 0.0).count();
        assert!(negative > 150 && negative < 250, "negative={negative}");
    }
}
