//! Detail panel for the selected contact: every number and e-mail.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use contactbook_core::name::full_name;
use contactbook_shared::ContactRecord;

pub(crate) fn draw(f: &mut Frame, area: Rect, contact: Option<&ContactRecord>) {
    let block = Block::default().borders(Borders::ALL).title(" Details ");

    let Some(contact) = contact else {
        f.render_widget(Paragraph::new("No contact selected").block(block), area);
        return;
    };

    let p = Paragraph::new(detail_lines(contact))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

fn detail_lines(contact: &ContactRecord) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(full_name(contact), bold)),
        Line::from(format!("id {}", contact.id)).style(Style::default().fg(Color::DarkGray)),
        Line::from(""),
        Line::from(Span::styled("Phone", bold)),
    ];

    for phone in &contact.phone_numbers {
        lines.push(labelled(phone.label.as_deref(), &phone.number));
    }

    if !contact.emails.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("E-mail", bold)));
        for email in &contact.emails {
            lines.push(labelled(email.label.as_deref(), &email.email));
        }
    }

    lines
}

fn labelled(label: Option<&str>, value: &str) -> Line<'static> {
    match label {
        Some(label) => Line::from(format!("  {value}  ({label})")),
        None => Line::from(format!("  {value}")),
    }
}
