//! Reusable TUI widgets.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Bottom status bar: message on the left, key hint on the right.
pub(crate) fn status_bar<'a>(msg: &'a str, hint: &'a str, width: u16) -> Paragraph<'a> {
    let used = msg.chars().count() + hint.chars().count() + 2;
    let gap = usize::from(width).saturating_sub(used);
    let line = Line::from(vec![
        Span::raw(format!(" {msg}")),
        Span::raw(" ".repeat(gap)),
        Span::styled(format!("{hint} "), Style::default().fg(Color::Gray)),
    ]);
    Paragraph::new(line).style(Style::default().bg(Color::DarkGray).fg(Color::White))
}
