//! Grid widget - one line per row, note name on the left

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use gridsynth::sequencing::{Grid, Scale};

const LABEL_WIDTH: usize = 5;

/// Render the step grid with the cursor and playhead column.
pub fn render_grid(
    frame: &mut Frame,
    area: Rect,
    grid: &Grid,
    scale: Scale,
    cursor: (usize, usize),
    playhead: Option<usize>,
) {
    let block = Block::default().title(" Pattern ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::with_capacity(grid.rows() + 1);

    // Beat numbers above every downbeat
    let mut header = " ".repeat(LABEL_WIDTH);
    for col in 0..grid.columns() {
        if col % 4 == 0 {
            header.push_str(&format!("{:<2}", col / 4 + 1));
        } else {
            header.push_str("  ");
        }
    }
    lines.push(Line::from(Span::styled(header, Style::default().fg(Color::DarkGray))));

    for row in 0..grid.rows() {
        let name = scale.note_name(row).unwrap_or("?");
        let mut spans = vec![Span::styled(
            format!("{name:<width$}", width = LABEL_WIDTH),
            Style::default().fg(Color::Gray),
        )];

        for col in 0..grid.columns() {
            let on = grid.get(row, col);
            let symbol = if on { "██" } else if col % 4 == 0 { "░░" } else { "··" };

            let mut style = Style::default().fg(if on { Color::Cyan } else { Color::DarkGray });
            if playhead == Some(col) {
                style = style.bg(Color::Rgb(40, 40, 60));
                if on {
                    style = style.fg(Color::Yellow);
                }
            }
            if cursor == (row, col) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(symbol, style));
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
