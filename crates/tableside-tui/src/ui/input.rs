//! Input pane
//!
//! Displays the input buffer with cursor. The buffer may span multiple
//! lines (Shift+Enter).

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use tableside_app::App;

const PROMPT_WIDTH: u16 = 3; // "> "
const INPUT_LINE_OFFSET_Y: u16 = 1; // inside top border
const RIGHT_PADDING: u16 = 1; // inside right border

/// Render the input pane.
#[allow(clippy::cast_possible_truncation)]
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);

    // Prompt on the first line only; continuation lines are indented to
    // line up under it.
    let mut text = String::with_capacity(app.input_buffer().len() + 2);
    text.push_str("> ");
    for c in app.input_buffer().chars() {
        text.push(c);
        if c == '\n' {
            text.push_str("  ");
        }
    }

    let paragraph = Paragraph::new(text).style(Style::default().fg(Color::White)).block(block);
    frame.render_widget(paragraph, area);

    // Cursor row/column from the byte offset.
    let before = &app.input_buffer()[..app.cursor()];
    let row = before.matches('\n').count() as u16;
    let col = before.rsplit('\n').next().unwrap_or_default().chars().count() as u16;

    let available_width = area.width.saturating_sub(PROMPT_WIDTH + RIGHT_PADDING);
    let cursor_offset = col.min(available_width);

    let cursor_x = area.x.saturating_add(PROMPT_WIDTH).saturating_add(cursor_offset);
    let cursor_y = area.y.saturating_add(INPUT_LINE_OFFSET_Y).saturating_add(row);
    let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING);
    let max_y = area.y.saturating_add(area.height).saturating_sub(1);
    let cursor_x = cursor_x.min(max_x);
    let cursor_y = cursor_y.min(max_y);

    frame.set_cursor_position((cursor_x, cursor_y));
}
