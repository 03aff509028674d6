//! Lock-free bridge between the control thread and the audio callback.
//!
//! [`RealtimeGraph::new`] splits a [`SignalGraph`] into two halves:
//!
//! ```text
//!   control thread                         audio thread
//!   ──────────────                         ────────────
//!   GraphHandle ── messages ────────────→  RealtimeGraph
//!       ↑  ↑                                    │  │
//!       │  └──────── retired voices ←───────────┘  │
//!       └─────── clock, suspended (atomic) ←───────┘
//! ```
//!
//! The handle implements [`OutputBus`], [`AudioClock`] and [`MixerControls`],
//! so the session drives it exactly like an in-process graph. Events are
//! allocated on the control thread and only moved across the queue. Voices
//! leaving the graph travel back on a second queue and are freed on the
//! control thread. Suspension is a shared flag rather than a message, so it
//! cannot be lost to a full queue.

use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

use rtrb::{Consumer, Producer, RingBuffer};
use tracing::trace;

use crate::synth::{
    bus::{AudioClock, MixerControls, OutputBus},
    graph::{SignalGraph, MAX_VOICES},
    voice::{ScheduledVoice, VoiceEvent},
};

const GRAPH_QUEUE_SIZE: usize = 512;
const RETIRE_QUEUE_SIZE: usize = GRAPH_QUEUE_SIZE + MAX_VOICES;

pub enum GraphMessage {
    Schedule(VoiceEvent),
    MasterLevel(f32),
    WetDryMix(f32),
}

struct Shared {
    frame: AtomicU64,
    suspended: AtomicBool,
}

/// Audio-thread half. Move it into the output callback.
pub struct RealtimeGraph {
    graph: SignalGraph,
    rx: Consumer<GraphMessage>,
    retired_tx: Producer<ScheduledVoice>,
    shared: Arc<Shared>,
}

/// Control-thread half.
pub struct GraphHandle {
    tx: Producer<GraphMessage>,
    retired_rx: Consumer<ScheduledVoice>,
    shared: Arc<Shared>,
    sample_rate: f32,
}

/// Hand `voice` to the control thread. Only a full queue frees it here.
fn retire(queue: &mut Producer<ScheduledVoice>, voice: ScheduledVoice) {
    if queue.push(voice).is_err() {
        trace!("retire queue full, freeing voice on the audio thread");
    }
}

impl RealtimeGraph {
    pub fn new(graph: SignalGraph) -> (Self, GraphHandle) {
        let (tx, rx) = RingBuffer::<GraphMessage>::new(GRAPH_QUEUE_SIZE);
        let (retired_tx, retired_rx) = RingBuffer::<ScheduledVoice>::new(RETIRE_QUEUE_SIZE);
        let shared = Arc::new(Shared {
            frame: AtomicU64::new(graph.frame()),
            suspended: AtomicBool::new(graph.is_suspended()),
        });
        let sample_rate = graph.sample_rate();

        let handle = GraphHandle {
            tx,
            retired_rx,
            shared: Arc::clone(&shared),
            sample_rate,
        };
        let node = Self {
            graph,
            rx,
            retired_tx,
            shared,
        };

        (node, handle)
    }

    /// Follow the suspend flag, apply queued control messages, then render `out`.
    pub fn render(&mut self, out: &mut [f32]) {
        let suspended = self.shared.suspended.load(Ordering::Acquire);
        if suspended != self.graph.is_suspended() {
            if suspended {
                self.graph.suspend();
            } else {
                self.graph.resume();
            }
        }

        while let Ok(msg) = self.rx.pop() {
            match msg {
                GraphMessage::Schedule(event) => {
                    if let Some(voice) = self.graph.insert(event) {
                        retire(&mut self.retired_tx, voice);
                    }
                }
                GraphMessage::MasterLevel(level) => self.graph.set_master_level(level),
                GraphMessage::WetDryMix(mix) => self.graph.set_wet_dry_mix(mix),
            }
        }

        let retired_tx = &mut self.retired_tx;
        self.graph
            .render_retiring(out, |voice| retire(retired_tx, voice));
        self.shared.frame.store(self.graph.frame(), Ordering::Release);
    }
}

impl GraphHandle {
    fn send(&mut self, msg: GraphMessage) {
        self.collect_retired();
        if self.tx.push(msg).is_err() {
            trace!("graph queue full, dropping message");
        }
    }

    /// Free voices the audio thread has finished with. Returns how many.
    pub fn collect_retired(&mut self) -> usize {
        let mut freed = 0;
        while self.retired_rx.pop().is_ok() {
            freed += 1;
        }
        freed
    }

    /// Silence the graph and stop its clock. Takes effect on the next callback.
    pub fn suspend(&mut self) {
        self.shared.suspended.store(true, Ordering::Release);
    }

    pub fn resume(&mut self) {
        self.shared.suspended.store(false, Ordering::Release);
    }
}

impl OutputBus for GraphHandle {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn is_available(&self) -> bool {
        !self.shared.suspended.load(Ordering::Acquire)
    }

    fn schedule(&mut self, event: VoiceEvent) {
        self.send(GraphMessage::Schedule(event));
    }
}

impl AudioClock for GraphHandle {
    fn current_time(&self) -> f64 {
        self.shared.frame.load(Ordering::Acquire) as f64 / self.sample_rate as f64
    }
}

impl MixerControls for GraphHandle {
    fn set_master_level(&mut self, level: f32) {
        self.send(GraphMessage::MasterLevel(level));
    }

    fn set_wet_dry_mix(&mut self, mix: f32) {
        self.send(GraphMessage::WetDryMix(mix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::envelope::EnvNode;

    #[test]
    fn clock_follows_audio_thread() {
        let (mut audio, handle) = RealtimeGraph::new(SignalGraph::new(1_000.0));
        assert_eq!(handle.current_time(), 0.0);

        let mut out = vec![0.0; 500];
        audio.render(&mut out);
        assert!((handle.current_time() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn scheduled_event_reaches_audio_thread() {
        let graph = SignalGraph::new(1_000.0).with_levels(1.0, 0.0);
        let (mut audio, mut handle) = RealtimeGraph::new(graph);

        handle.schedule(VoiceEvent::new(0.0, 1.0, 440.0, Box::new(EnvNode::constant(0.5))));
        let mut out = vec![0.0; 16];
        audio.render(&mut out);

        assert!(out.iter().all(|&s| (s - 0.5).abs() < 1e-6));
    }

    #[test]
    fn suspend_is_visible_immediately() {
        let (mut audio, mut handle) = RealtimeGraph::new(SignalGraph::new(1_000.0));
        handle.suspend();
        assert!(!handle.is_available());

        let mut out = vec![1.0; 16];
        audio.render(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
        assert_eq!(handle.current_time(), 0.0, "clock stops while suspended");

        handle.resume();
        assert!(handle.is_available());
    }

    #[test]
    fn resume_survives_a_full_queue() {
        let graph = SignalGraph::new(1_000.0).with_levels(1.0, 0.0);
        let (mut audio, mut handle) = RealtimeGraph::new(graph);

        let mut out = vec![0.0; 16];
        handle.suspend();
        audio.render(&mut out);
        for _ in 0..GRAPH_QUEUE_SIZE {
            handle.set_master_level(1.0);
        }
        handle.resume();
        audio.render(&mut out);
        handle.schedule(VoiceEvent::new(0.0, 1.0, 440.0, Box::new(EnvNode::constant(0.5))));
        audio.render(&mut out);

        assert!(handle.is_available());
        assert!(out.iter().all(|&s| (s - 0.5).abs() < 1e-6), "got {:?}", &out[..4]);
        assert!(handle.current_time() > 0.0, "clock runs again");
    }

    #[test]
    fn finished_voices_come_back_to_the_handle() {
        let (mut audio, mut handle) = RealtimeGraph::new(SignalGraph::new(1_000.0));
        handle.schedule(VoiceEvent::new(0.0, 0.01, 440.0, Box::new(EnvNode::constant(0.1))));
        handle.schedule(VoiceEvent::new(0.0, 1.0, 440.0, Box::new(EnvNode::constant(0.1))));

        let mut out = vec![0.0; 50];
        audio.render(&mut out);

        assert_eq!(handle.collect_retired(), 1);
        assert_eq!(handle.collect_retired(), 0);
    }

    #[test]
    fn full_queue_drops_without_blocking() {
        let (_audio, mut handle) = RealtimeGraph::new(SignalGraph::new(1_000.0));
        for _ in 0..GRAPH_QUEUE_SIZE + 10 {
            handle.set_master_level(0.5);
        }
        // Reaching here without blocking is the assertion
        assert_eq!(handle.tx.slots(), 0);
    }
}
