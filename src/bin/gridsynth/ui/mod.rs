//! TUI for gridsynth
//!
//! Grid editor, transport bar and scope. The UI loop also drives the
//! session: every pass polls the tick handle, so the scheduler runs at the
//! session's tick interval while the screen redraws at about 60 fps.

mod grid;
mod state;
mod transport;
mod waveform;

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use tracing::warn;

use gridsynth::{
    io::write_wav,
    runtime::{RANDOMIZE_OTHER, RANDOMIZE_STRONG},
    sequencing::Genre,
    synth::{AudioClock, GraphHandle},
};

use grid::render_grid;
use state::Playhead;
use transport::{render_transport, AudioStats};
use waveform::render_waveform;

pub type Session = gridsynth::runtime::Session<GraphHandle>;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const LEVEL_STEP: f32 = 0.05;
const TEMPO_STEP: i32 = 5;
const COLUMN_STEP: usize = 4;
const EXPORT_PATH: &str = "gridsynth-bounce.wav";

pub struct UiApp {
    session: Session,
    audio_rx: Consumer<f32>,
    audio_buffer: Vec<f32>,
    playhead: Playhead,
    cursor: (usize, usize),
    genre: Genre,
    sample_rate: f32,
    status: Option<String>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(session: Session, audio_rx: Consumer<f32>, genre: Genre, sample_rate: f32) -> Self {
        Self {
            session,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            playhead: Playhead::default(),
            cursor: (0, 0),
            genre,
            sample_rate,
            status: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();

            let now = Instant::now();
            self.playhead.push(self.session.poll(now));
            self.playhead.advance(self.session.backend().current_time());

            terminal.draw(|frame| self.render(frame))?;

            let timeout = self
                .session
                .until_next_tick(Instant::now())
                .map_or(FRAME_INTERVAL, |t| t.min(FRAME_INTERVAL));
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.session.stop();
        Ok(())
    }

    /// Keep the last VIS_BUFFER_SIZE samples from the audio thread
    fn poll_audio(&mut self) {
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let (row, col) = self.cursor;
        let rows = self.session.grid().rows();
        let columns = self.session.grid().columns();

        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,

            KeyCode::Up | KeyCode::Char('k') => self.cursor.0 = (row + rows - 1) % rows,
            KeyCode::Down | KeyCode::Char('j') => self.cursor.0 = (row + 1) % rows,
            KeyCode::Left | KeyCode::Char('h') => self.cursor.1 = (col + columns - 1) % columns,
            KeyCode::Right | KeyCode::Char('l') => self.cursor.1 = (col + 1) % columns,
            KeyCode::Enter | KeyCode::Char('x') => {
                self.session.flip_cell(row, col);
            }

            KeyCode::Char(' ') => {
                if !self.session.toggle_playback() {
                    self.playhead.reset();
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let tempo = self.session.tempo().nudged(TEMPO_STEP);
                self.session.set_tempo(tempo.bpm());
            }
            KeyCode::Char('-') => {
                let tempo = self.session.tempo().nudged(-TEMPO_STEP);
                self.session.set_tempo(tempo.bpm());
            }
            KeyCode::Char('[') => self.resize(columns.saturating_sub(COLUMN_STEP)),
            KeyCode::Char(']') => self.resize(columns + COLUMN_STEP),

            KeyCode::Char('s') => self.session.set_scale(self.session.scale().next()),
            KeyCode::Char('S') => self.session.set_scale(self.session.scale().prev()),
            KeyCode::Char('t') => self.session.set_timbre(self.session.timbre().next()),
            KeyCode::Char('T') => self.session.set_timbre(self.session.timbre().prev()),

            KeyCode::Char('g') => {
                self.playhead.reset();
                self.session.generate(self.genre);
                self.status = Some(format!("Generated a {} pattern", self.genre));
            }
            KeyCode::Char('G') => self.genre = self.genre.next(),
            KeyCode::Char('r') => self.session.randomize(RANDOMIZE_STRONG, RANDOMIZE_OTHER),
            KeyCode::Char('c') => self.session.clear(),

            KeyCode::Char('m') => {
                let level = self.session.master_level() - LEVEL_STEP;
                self.session.set_master_level(level);
            }
            KeyCode::Char('M') => {
                let level = self.session.master_level() + LEVEL_STEP;
                self.session.set_master_level(level);
            }
            KeyCode::Char('w') => {
                let mix = self.session.wet_dry_mix() - LEVEL_STEP;
                self.session.set_wet_dry_mix(mix);
            }
            KeyCode::Char('W') => {
                let mix = self.session.wet_dry_mix() + LEVEL_STEP;
                self.session.set_wet_dry_mix(mix);
            }

            KeyCode::Char('e') => self.export(),
            _ => {}
        }
    }

    fn resize(&mut self, columns: usize) {
        self.session.resize_columns(columns);
        self.cursor.1 = self.cursor.1.min(self.session.grid().columns() - 1);
    }

    fn export(&mut self) {
        let bounce = self.session.bounce();
        self.status = Some(match write_wav(EXPORT_PATH, &bounce) {
            Ok(()) => format!("Bounced {:.2}s to {EXPORT_PATH}", bounce.duration()),
            Err(err) => {
                warn!(%err, "bounce failed");
                format!("Bounce failed: {err}")
            }
        });
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let grid_height = self.session.grid().rows() as u16 + 3;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),           // Transport bar
                Constraint::Length(grid_height), // Grid
                Constraint::Min(6),              // Scope
                Constraint::Length(1),           // Status
                Constraint::Length(1),           // Help bar
            ])
            .split(area);

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_transport(
            frame,
            chunks[0],
            &self.session,
            self.playhead.display_step(),
            self.genre,
            self.sample_rate,
            &stats,
        );

        render_grid(
            frame,
            chunks[1],
            self.session.grid(),
            self.session.scale(),
            self.cursor,
            self.playhead.current(),
        );

        render_waveform(frame, chunks[2], &self.audio_buffer);

        if let Some(status) = &self.status {
            let line = Paragraph::new(format!(" {status}")).style(Style::default().fg(Color::Green));
            frame.render_widget(line, chunks[3]);
        }

        let help = Paragraph::new(
            " [Space] Play/Stop  [x] Toggle  [g/G] Generate/Genre  [r] Random  [c] Clear  \
             [+/-] BPM  [[/]] Steps  [s/t] Scale/Timbre  [m/w] Levels  [e] Export  [q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[4]);
    }
}
