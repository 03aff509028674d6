//! Transport bar widget - tempo, play state, step, sound settings and levels

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use gridsynth::{runtime::step_label, sequencing::Genre};

use super::Session;

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Render the transport bar
pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    step: usize,
    genre: Genre,
    sample_rate: f32,
    stats: &AudioStats,
) {
    let block = Block::default().title(" gridsynth ").borders(Borders::ALL);

    let playing = session.is_playing();
    let (symbol, state) = if playing { ("▶", "Playing") } else { ("■", "Stopped") };

    let top = Line::from(vec![
        Span::styled(format!(" {}  ", session.tempo()), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{symbol} {state}  "),
            Style::default().fg(if playing { Color::Green } else { Color::Yellow }),
        ),
        Span::styled(
            format!("Step {}  ", step_label(step, session.grid().columns())),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:.1}kHz  ", sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let bottom = Line::from(vec![
        Span::styled(format!(" Scale: {}  ", session.scale()), Style::default().fg(Color::White)),
        Span::styled(format!("Timbre: {}  ", session.timbre()), Style::default().fg(Color::White)),
        Span::styled(format!("Genre: {genre}  "), Style::default().fg(Color::White)),
        Span::styled(
            format!("Master: {:.2}  Reverb: {:.2}", session.master_level(), session.wet_dry_mix()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(vec![top, bottom]).block(block);
    frame.render_widget(paragraph, area);
}
