use crate::{
    dsp::delay::FeedbackDelay,
    graph::node::{GraphNode, RenderCtx},
};

/// Karplus-Strong plucked string.
///
/// The delay line is sized and excited at construction, so the node needs the
/// output sample rate up front; the pitch is fixed for the life of the event.
pub struct PluckNode {
    line: FeedbackDelay,
}

impl PluckNode {
    pub fn new(frequency: f32, sample_rate: f32) -> Self {
        let mut line = FeedbackDelay::new(FeedbackDelay::length_for(frequency, sample_rate));
        line.pluck(&mut rand::rng());
        Self { line }
    }

    /// Samples per period of the string.
    pub fn delay_len(&self) -> usize {
        self.line.len()
    }
}

impl GraphNode for PluckNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        self.line.render(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_matches_pitch() {
        let node = PluckNode::new(220.0, 44_100.0);
        assert_eq!(node.delay_len(), 201);
    }

    #[test]
    fn output_repeats_with_decay() {
        // A short line loses its highs quickly
        let mut node = PluckNode::new(2_205.0, 44_100.0);
        let mut buffer = vec![0.0; 44_100];
        node.render_block(&mut buffer, &RenderCtx::from_freq(44_100.0, 2_205.0));

        // The averaging loop keeps the excitation's DC offset, so compare variance
        let variance = |b: &[f32]| {
            let mean = b.iter().sum::<f32>() / b.len() as f32;
            b.iter().map(|x| (x - mean) * (x - mean)).sum::<f32>()
        };
        assert!(variance(&buffer[..4410]) > variance(&buffer[39_690..]) * 4.0);
        assert!(buffer.iter().all(|s| s.abs() <= 1.0));
    }
}
