use crate::{
    dsp::noise::{NoiseColor, NoiseSource},
    graph::node::{GraphNode, RenderCtx},
};

/// Unpitched noise source. Ignores `ctx.frequency`.
pub struct NoiseNode {
    source: NoiseSource,
}

impl NoiseNode {
    pub fn white() -> Self {
        Self::new(NoiseColor::White)
    }

    pub fn pink() -> Self {
        Self::new(NoiseColor::Pink)
    }

    pub fn new(color: NoiseColor) -> Self {
        Self {
            source: NoiseSource::new(color),
        }
    }

    pub fn seeded(color: NoiseColor, seed: u64) -> Self {
        Self {
            source: NoiseSource::seeded(color, seed),
        }
    }
}

impl GraphNode for NoiseNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        self.source.render(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_unseeded_sources_differ() {
        let ctx = RenderCtx::from_freq(44_100.0, 440.0);
        let mut a = vec![0.0; 64];
        let mut b = vec![0.0; 64];
        NoiseNode::white().render_block(&mut a, &ctx);
        NoiseNode::white().render_block(&mut b, &ctx);
        assert_ne!(a, b);
    }
}
