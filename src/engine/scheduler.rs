/*
Lookahead Scheduler
===================

The control loop wakes on a coarse timer (every ~20 ms, give or take a few
ms of jitter). Firing sounds from inside that callback would smear the
rhythm by the same jitter. Instead the scheduler works ahead of the audio
clock:

    audio clock ─────●─────────────────────────────────────→
                    now            now + lookahead
                     │◄──────── window ────────►│
    steps:     ──┬───┼────┬────┬────┬────┬──────┼──┬───
                 │   │    ✓    ✓    ✓    ✓      │  (next tick)
                 already dispatched

Every tick dispatches each step whose start time falls inside the window,
stamping the trigger with that exact future time. The audio side starts the
sound on the right sample no matter when the tick itself ran.

Cursor
------
`current_step` is the next step to dispatch, `next_trigger_time` its start
on the audio clock. Each dispatched step advances the time by the step
duration of the tempo *at that moment*, so a tempo change bends only steps
that have not been dispatched yet.

The scheduler is pure: it reads the grid and returns values. Fanning the
triggers out to the synthesis engine and the step events out to the UI is
the caller's job.
*/

use tracing::{debug, trace};

use crate::{
    sequencing::{Grid, Scale, Tempo},
    voices::Timbre,
};

/// Default lookahead window in seconds.
pub const DEFAULT_LOOKAHEAD: f64 = 0.12;

/// One active cell due to sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerEvent {
    pub row: usize,
    pub step: usize,
    pub frequency: f32,
    /// Start on the audio clock, in seconds.
    pub time: f64,
    pub timbre: Timbre,
}

/// A step reached, for the playhead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEvent {
    pub step: usize,
    pub time: f64,
}

/// Everything one tick decided.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Dispatch {
    pub triggers: Vec<TriggerEvent>,
    pub steps: Vec<StepEvent>,
}

impl Dispatch {
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty() && self.steps.is_empty()
    }
}

/// What the scheduler reads from the session on every tick.
#[derive(Debug, Clone, Copy)]
pub struct Pattern<'a> {
    pub grid: &'a Grid,
    pub tempo: Tempo,
    pub scale: Scale,
    pub timbre: Timbre,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    lookahead: f64,
    playing: bool,
    current_step: usize,
    next_trigger_time: f64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKAHEAD)
    }
}

impl Scheduler {
    pub fn new(lookahead: f64) -> Self {
        Self {
            lookahead: lookahead.max(0.0),
            playing: false,
            current_step: 0,
            next_trigger_time: 0.0,
        }
    }

    pub fn lookahead(&self) -> f64 {
        self.lookahead
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn next_trigger_time(&self) -> f64 {
        self.next_trigger_time
    }

    /// Begin playback from step 0 at `now`. Returns `false` if already playing,
    /// in which case the cursor is left alone.
    pub fn start(&mut self, now: f64) -> bool {
        if self.playing {
            return false;
        }
        self.playing = true;
        self.current_step = 0;
        self.next_trigger_time = now;
        debug!(now, "transport started");
        true
    }

    /// Stop playback and reset the cursor to step 0. Returns `false` if
    /// already stopped.
    pub fn stop(&mut self) -> bool {
        let was_playing = self.playing;
        self.playing = false;
        self.current_step = 0;
        if was_playing {
            debug!("transport stopped");
        }
        was_playing
    }

    /// Keep the cursor inside a grid of `columns` columns.
    pub fn clamp_to_columns(&mut self, columns: usize) {
        if columns > 0 {
            self.current_step %= columns;
        }
    }

    /// Dispatch every step starting before `now + lookahead`.
    pub fn tick(&mut self, now: f64, pattern: Pattern<'_>) -> Dispatch {
        let mut dispatch = Dispatch::default();
        if !self.playing {
            return dispatch;
        }

        let columns = pattern.grid.columns();
        self.clamp_to_columns(columns);

        while self.next_trigger_time < now + self.lookahead {
            let step = self.current_step;
            let time = self.next_trigger_time;

            for row in pattern.grid.active_in_column(step) {
                dispatch.triggers.push(TriggerEvent {
                    row,
                    step,
                    frequency: pattern.scale.frequency(row),
                    time,
                    timbre: pattern.timbre,
                });
            }
            dispatch.steps.push(StepEvent { step, time });
            trace!(step, time, "step dispatched");

            self.next_trigger_time += pattern.tempo.step_duration();
            self.current_step = (step + 1) % columns;
        }

        dispatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(grid: &Grid, bpm: u32) -> Pattern<'_> {
        Pattern {
            grid,
            tempo: Tempo::new(bpm),
            scale: Scale::Major,
            timbre: Timbre::Square,
        }
    }

    #[test]
    fn stopped_scheduler_dispatches_nothing() {
        let grid = Grid::default();
        let mut scheduler = Scheduler::default();
        assert!(scheduler.tick(1.0, pattern(&grid, 120)).is_empty());
    }

    #[test]
    fn dispatches_steps_inside_window() {
        let mut grid = Grid::default();
        grid.set(0, 0, true);
        grid.set(7, 0, true);
        grid.set(3, 1, true);

        let mut scheduler = Scheduler::new(0.12);
        scheduler.start(0.0);
        // 120 BPM: steps at 0.0 and 0.125; only 0.0 is inside [0, 0.12)
        let first = scheduler.tick(0.0, pattern(&grid, 120));
        assert_eq!(first.steps, vec![StepEvent { step: 0, time: 0.0 }]);
        assert_eq!(first.triggers.len(), 2);
        assert_eq!(first.triggers[0].row, 0);
        assert_eq!(first.triggers[1].row, 7);
        assert_eq!(first.triggers[0].frequency, Scale::Major.frequency(0));

        // Next tick 20 ms later reaches 0.125
        let second = scheduler.tick(0.02, pattern(&grid, 120));
        assert_eq!(second.steps, vec![StepEvent { step: 1, time: 0.125 }]);
        assert_eq!(second.triggers.len(), 1);
        assert_eq!(second.triggers[0].time, 0.125);
        assert_eq!(second.triggers[0].row, 3);
    }

    #[test]
    fn one_trigger_per_cell_per_step() {
        let mut grid = Grid::default();
        for col in 0..grid.columns() {
            grid.set(2, col, true);
        }

        let mut scheduler = Scheduler::default();
        scheduler.start(0.0);
        let mut triggers = Vec::new();
        // Jittery ticks over exactly one loop (2 s at 120 BPM)
        let mut now = 0.0;
        while now < 2.0 - scheduler.lookahead() {
            triggers.extend(scheduler.tick(now, pattern(&grid, 120)).triggers);
            now += 0.017 + (now * 7.0).sin().abs() * 0.01;
        }
        triggers.extend(scheduler.tick(2.0 - scheduler.lookahead() - 1e-9, pattern(&grid, 120)).triggers);

        let steps: Vec<usize> = triggers.iter().map(|t| t.step).collect();
        assert_eq!(steps, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn trigger_times_advance_by_step_duration() {
        let grid = Grid::default();
        let mut scheduler = Scheduler::default();
        scheduler.start(0.5);

        let steps = scheduler.tick(2.0, pattern(&grid, 90)).steps;
        let step = Tempo::new(90).step_duration();
        for pair in steps.windows(2) {
            assert!(pair[1].time > pair[0].time);
            assert!((pair[1].time - pair[0].time - step).abs() < 1e-9);
        }
    }

    #[test]
    fn tempo_change_affects_following_steps_only() {
        let grid = Grid::default();
        let mut scheduler = Scheduler::new(0.05);
        scheduler.start(0.0);

        let first = scheduler.tick(0.0, pattern(&grid, 120)).steps;
        assert_eq!(first.len(), 1);
        // Step 1 was fixed at 0.125 when step 0 was dispatched
        assert_eq!(scheduler.next_trigger_time(), 0.125);

        let second = scheduler.tick(0.1, pattern(&grid, 60)).steps;
        assert_eq!(second[0].time, 0.125);
        assert_eq!(scheduler.next_trigger_time(), 0.125 + 0.25);
    }

    #[test]
    fn redundant_start_keeps_cursor() {
        let grid = Grid::default();
        let mut scheduler = Scheduler::default();
        assert!(scheduler.start(0.0));
        scheduler.tick(0.5, pattern(&grid, 120));
        let step = scheduler.current_step();
        assert_ne!(step, 0);

        assert!(!scheduler.start(10.0));
        assert_eq!(scheduler.current_step(), step);
    }

    #[test]
    fn stop_then_start_resets() {
        let grid = Grid::default();
        let mut scheduler = Scheduler::default();
        scheduler.start(0.0);
        scheduler.tick(0.5, pattern(&grid, 120));

        assert!(scheduler.stop());
        assert!(!scheduler.stop());
        assert_eq!(scheduler.current_step(), 0);

        scheduler.start(3.0);
        assert_eq!(scheduler.current_step(), 0);
        assert_eq!(scheduler.next_trigger_time(), 3.0);
    }

    #[test]
    fn shrinking_grid_wraps_cursor() {
        let big = Grid::new(8, 16);
        let mut scheduler = Scheduler::default();
        scheduler.start(0.0);
        // Steps 0..=12 start before 1.4 + 0.12
        scheduler.tick(1.4, pattern(&big, 120));
        assert_eq!(scheduler.current_step(), 13);

        let small = Grid::new(8, 8);
        let dispatch = scheduler.tick(1.6, pattern(&small, 120));
        assert_eq!(dispatch.steps[0].step, 5);
        assert!(dispatch.steps.iter().all(|s| s.step < 8));
    }
}
