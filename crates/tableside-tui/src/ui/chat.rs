//! Chat area
//!
//! Displays the conversation log, newest messages kept in view.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use tableside_app::App;
use tableside_proto::Role;

const BORDER_SIZE: u16 = 2;

/// Render the chat area.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Tableside ");

    let mut lines: Vec<Line> = Vec::new();
    for message in app.messages() {
        let (label, style) = match message.role {
            Role::User => ("You", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Role::System => {
                ("Tableside", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            },
        };

        let mut content_lines = message.content.lines();
        let first = content_lines.next().unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", message.timestamp), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{label}: "), style),
            Span::raw(first.to_string()),
        ]));
        for continuation in content_lines {
            lines.push(Line::from(Span::raw(continuation.to_string())));
        }
    }

    if app.is_loading() {
        lines.push(Line::from(Span::styled(
            "Tableside is thinking...",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    // Stick to the bottom: drop lines that no longer fit above the fold.
    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = lines.len().saturating_sub(visible_height);
    let items: Vec<ListItem> =
        lines.into_iter().skip(skip).map(ListItem::new).collect();

    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}
