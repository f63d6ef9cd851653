//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod chat;
mod input;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};
use tableside_app::App;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    const CHAT_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_BORDER_HEIGHT: u16 = 2;
    const INPUT_MAX_LINES: u16 = 4;
    const STATUS_HEIGHT: u16 = 1;

    // The input pane grows with the buffer (Shift+Enter inserts newlines)
    // up to a cap.
    #[allow(clippy::cast_possible_truncation)]
    let input_lines = (app.input_buffer().lines().count().max(1) as u16).min(INPUT_MAX_LINES);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(CHAT_AREA_MIN_HEIGHT),
            Constraint::Length(input_lines + INPUT_BORDER_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [chat_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    chat::render(frame, app, *chat_area);
    input::render(frame, app, *input_area);
    status::render(frame, app, *status_area);
}
