//! Playhead state for the UI.
//!
//! The scheduler hands out step events up to the lookahead window ahead of
//! the audio clock. They are queued here and the highlighted column only
//! moves once the clock actually reaches each event's time.

use std::collections::VecDeque;

use gridsynth::engine::StepEvent;

#[derive(Debug, Default)]
pub struct Playhead {
    pending: VecDeque<StepEvent>,
    current: Option<usize>,
}

impl Playhead {
    pub fn push(&mut self, events: impl IntoIterator<Item = StepEvent>) {
        self.pending.extend(events);
    }

    /// Move to the latest step whose time has come.
    pub fn advance(&mut self, now: f64) {
        while let Some(event) = self.pending.front() {
            if event.time > now {
                break;
            }
            self.current = Some(event.step);
            self.pending.pop_front();
        }
    }

    /// Drop queued steps and clear the highlight.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.current = None;
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Step shown in the transport bar; 0 while stopped.
    pub fn display_step(&self) -> usize {
        self.current.unwrap_or(0)
    }
}
