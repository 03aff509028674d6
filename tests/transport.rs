//! Scheduler and transport behaviour driven through `Session`, against a
//! backend whose clock the test moves by hand.

use gridsynth::{
    runtime::{Session, SessionConfig},
    synth::{AudioClock, MixerControls, OutputBus, VoiceEvent},
    voices::Timbre,
};

#[derive(Default)]
struct ManualBackend {
    time: f64,
    suspended: bool,
    events: Vec<(f64, f32)>,
    master: f32,
    mix: f32,
}

impl OutputBus for ManualBackend {
    fn sample_rate(&self) -> f32 {
        48_000.0
    }

    fn is_available(&self) -> bool {
        !self.suspended
    }

    fn schedule(&mut self, event: VoiceEvent) {
        self.events.push((event.start_time, event.frequency));
    }
}

impl AudioClock for ManualBackend {
    fn current_time(&self) -> f64 {
        self.time
    }
}

impl MixerControls for ManualBackend {
    fn set_master_level(&mut self, level: f32) {
        self.master = level;
    }

    fn set_wet_dry_mix(&mut self, mix: f32) {
        self.mix = mix;
    }
}

fn session() -> Session<ManualBackend> {
    // Sine schedules exactly one event per trigger
    Session::new(
        ManualBackend::default(),
        SessionConfig::default().bpm(120).timbre(Timbre::Sine).seed(3),
    )
}

/// Tick every ~20 ms with jitter until the clock reaches `until`.
fn run_until(session: &mut Session<ManualBackend>, until: f64) {
    let mut i = 0u32;
    while session.backend().time < until {
        session.tick();
        let jitter = [0.0, 0.004, -0.003, 0.007, 0.001][i as usize % 5];
        session.backend_mut().time += 0.02 + jitter;
        i += 1;
    }
}

#[test]
fn each_active_cell_fires_once_per_step_at_its_exact_time() {
    let mut session = session();
    session.toggle_cell(7, 0, true);
    session.toggle_cell(7, 4, true);
    session.toggle_cell(2, 9, true);
    session.start();

    // Three full loops of 2 s; stop short of the fourth downbeat
    run_until(&mut session, 6.0 - 0.13);

    let starts: Vec<f64> = session.backend().events.iter().map(|&(t, _)| t).collect();
    let mut expected = Vec::new();
    for lap in 0..3 {
        let base = lap as f64 * 2.0;
        expected.extend([base, base + 4.0 * 0.125, base + 9.0 * 0.125]);
    }
    assert_eq!(starts, expected);
}

#[test]
fn redundant_start_does_not_duplicate_triggers() {
    let mut session = session();
    session.toggle_cell(0, 0, true);
    session.toggle_cell(0, 8, true);

    assert!(session.start());
    session.tick();
    assert!(!session.start());
    assert!(!session.start());
    run_until(&mut session, 1.5);

    assert_eq!(session.backend().events.len(), 2);
}

#[test]
fn stop_start_resets_to_first_step() {
    let mut session = session();
    session.toggle_cell(3, 0, true);
    session.start();
    run_until(&mut session, 0.9);
    assert_ne!(session.current_step(), 0);

    session.stop();
    assert_eq!(session.current_step(), 0);
    let before = session.backend().events.len();
    run_until(&mut session, 1.5);
    assert_eq!(session.backend().events.len(), before, "nothing while stopped");

    session.start();
    assert_eq!(session.current_step(), 0);
    session.tick();
    let (last_start, _) = *session.backend().events.last().unwrap();
    assert_eq!(last_start, session.backend().time);
}

#[test]
fn tempo_change_only_moves_undispatched_steps() {
    let mut session = session();
    for col in 0..16 {
        session.toggle_cell(0, col, true);
    }
    session.start();
    run_until(&mut session, 0.5);

    let dispatched = session.backend().events.len();
    let last_fixed = session.backend().events[dispatched - 1].0;

    session.set_tempo(60);
    run_until(&mut session, 1.5);

    let starts: Vec<f64> = session.backend().events.iter().map(|&(t, _)| t).collect();
    // Steps already queued keep their 120 BPM spacing
    for pair in starts[..dispatched].windows(2) {
        assert!((pair[1] - pair[0] - 0.125).abs() < 1e-9);
    }
    // The first step after the change was fixed by the old tempo; later ones use 0.25 s
    assert!((starts[dispatched] - last_fixed - 0.125).abs() < 1e-9);
    for pair in starts[dispatched..].windows(2) {
        assert!((pair[1] - pair[0] - 0.25).abs() < 1e-9);
    }
}

#[test]
fn rows_map_to_scale_frequencies() {
    let mut session = session();
    session.toggle_cell(0, 0, true);
    session.toggle_cell(7, 0, true);
    session.start();
    session.tick();

    let freqs: Vec<f32> = session.backend().events.iter().map(|&(_, f)| f).collect();
    let scale = session.scale();
    assert_eq!(freqs, vec![scale.frequency(0), scale.frequency(7)]);
}

#[test]
fn suspended_output_drops_triggers_but_keeps_time() {
    let mut session = session();
    session.toggle_cell(0, 0, true);
    session.backend_mut().suspended = true;
    session.start();
    run_until(&mut session, 0.5);

    assert!(session.backend().events.is_empty());
    assert_ne!(session.current_step(), 0);
}

#[test]
fn shrinking_while_playing_keeps_reads_in_range() {
    let mut session = session();
    for row in 0..8 {
        session.toggle_cell(row, 15, true);
    }
    session.start();
    run_until(&mut session, 1.6);

    session.resize_columns(4);
    assert!(session.current_step() < 4);
    run_until(&mut session, 3.0);
}

#[test]
fn mixer_values_are_clamped_and_forwarded() {
    let mut session = session();
    session.set_master_level(1.7);
    session.set_wet_dry_mix(-0.2);
    assert_eq!(session.backend().master, 1.0);
    assert_eq!(session.backend().mix, 0.0);
}
