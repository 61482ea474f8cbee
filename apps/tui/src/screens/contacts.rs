//! Contact list screen — grouped list, jump index, and search box.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use contactbook_core::name::full_name;
use contactbook_core::{
    Dialer, LetterIndexEntry, RowLayout, Session, anchor_for, build_letter_index, letter_at_offset,
    primary_number, render,
};
use contactbook_shared::{ContactId, ContactRecord};

use super::details;

const ACCENT: Color = Color::Rgb(0xE1, 0xB8, 0x00);
const BANNER: Color = Color::Rgb(0xE1, 0x56, 0x10);

/// One visual row of the grouped list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Header(char),
    /// Position of the record in the snapshot.
    Contact(usize),
}

pub(crate) struct ContactsScreen {
    records: Vec<ContactRecord>,
    positions: HashMap<ContactId, usize>,
    /// Terminal-state text (access denied, no contacts).
    message: Option<&'static str>,
    dialer: Dialer,
    query: String,
    editing: bool,
    show_details: bool,
    rows: Vec<Row>,
    index: Vec<LetterIndexEntry>,
    /// Selected row; always a `Row::Contact` when set.
    selected: Option<usize>,
    offset: usize,
}

impl ContactsScreen {
    pub(crate) fn new(session: Session, dialer: Dialer) -> Self {
        let message = session.message();
        let records = match session {
            Session::Ready(snapshot) => snapshot.records,
            Session::Denied | Session::Empty => Vec::new(),
        };
        let positions = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();

        let mut screen = Self {
            records,
            positions,
            message,
            dialer,
            query: String::new(),
            editing: false,
            show_details: false,
            rows: Vec::new(),
            index: Vec::new(),
            selected: None,
            offset: 0,
        };
        screen.refresh();
        screen
    }

    pub(crate) fn is_editing(&self) -> bool {
        self.editing
    }

    /// Re-run the pipeline for the current query and rebuild rows and index.
    fn refresh(&mut self) {
        let groups = render(&self.records, &self.query);
        self.index = build_letter_index(&groups, RowLayout::default());

        self.rows.clear();
        for group in &groups {
            self.rows.push(Row::Header(group.letter));
            self.rows.extend(
                group
                    .contacts
                    .iter()
                    .filter_map(|c| self.positions.get(&c.id).copied())
                    .map(Row::Contact),
            );
        }

        self.offset = 0;
        self.selected = self.first_contact_row_from(0);
    }

    fn first_contact_row_from(&self, start: usize) -> Option<usize> {
        (start..self.rows.len()).find(|&i| matches!(self.rows[i], Row::Contact(_)))
    }

    fn last_contact_row_before(&self, end: usize) -> Option<usize> {
        (0..end).rev().find(|&i| matches!(self.rows[i], Row::Contact(_)))
    }

    fn selected_contact(&self) -> Option<&ContactRecord> {
        match self.rows.get(self.selected?)? {
            Row::Contact(pos) => self.records.get(*pos),
            Row::Header(_) => None,
        }
    }

    fn current_letter(&self) -> Option<char> {
        letter_at_offset(&self.index, self.selected?)
    }

    fn jump_to(&mut self, letter: char) -> Option<String> {
        match anchor_for(&self.index, letter) {
            Some(anchor) => {
                self.offset = anchor;
                self.selected = self.first_contact_row_from(anchor);
                None
            }
            None => Some(format!("No contacts under {}", letter.to_ascii_uppercase())),
        }
    }

    fn jump_relative(&mut self, forward: bool) {
        let Some(current) = self.current_letter() else {
            return;
        };
        let Some(pos) = self.index.iter().position(|e| e.letter == current) else {
            return;
        };
        let target = if forward {
            self.index.get(pos + 1)
        } else {
            pos.checked_sub(1).and_then(|p| self.index.get(p))
        };
        if let Some(entry) = target.copied() {
            self.jump_to(entry.letter);
        }
    }

    fn move_down(&mut self) {
        if let Some(sel) = self.selected {
            if let Some(next) = self.first_contact_row_from(sel + 1) {
                self.selected = Some(next);
            }
        }
    }

    fn move_up(&mut self) {
        if let Some(sel) = self.selected {
            if let Some(prev) = self.last_contact_row_before(sel) {
                self.selected = Some(prev);
            }
        }
    }

    fn call_selected(&self) -> String {
        let Some(contact) = self.selected_contact() else {
            return "No contact selected".to_string();
        };
        match self.dialer.call_uri(contact) {
            Ok(Some(uri)) => format!("Call: {uri}"),
            Ok(None) => "Phone number is not available".to_string(),
            Err(e) => format!("Error: {e}"),
        }
    }

    fn message_selected(&self) -> String {
        let Some(contact) = self.selected_contact() else {
            return "No contact selected".to_string();
        };
        match self.dialer.message_intent(contact) {
            Ok(Some(intent)) => format!("Message: {}  (web: {})", intent.native, intent.web_fallback),
            Ok(None) => "Phone number is not available".to_string(),
            Err(e) => format!("Error: {e}"),
        }
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Banner
                Constraint::Min(1),    // List + index
                Constraint::Length(3), // Search
            ])
            .split(area);

        let contact_total = self
            .rows
            .iter()
            .filter(|r| matches!(r, Row::Contact(_)))
            .count();
        let banner = Paragraph::new(format!(
            "Only Contacts with Phone Numbers  ·  {contact_total}"
        ))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::White)
                .bg(BANNER)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(BANNER)));
        f.render_widget(banner, chunks[0]);

        if let Some(message) = self.message {
            let p = Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Contacts "));
            f.render_widget(p, chunks[1]);
        } else {
            self.draw_list(f, chunks[1]);
        }

        let search_style = if self.editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let search = Paragraph::new(self.query.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .border_style(search_style),
        );
        f.render_widget(search, chunks[2]);
    }

    fn draw_list(&mut self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(5)])
            .split(area);

        let (list_area, detail_area) = if self.show_details {
            let split = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(columns[0]);
            (split[0], Some(split[1]))
        } else {
            (columns[0], None)
        };

        if self.rows.is_empty() {
            let empty = Paragraph::new(format!("No contacts match '{}'", self.query))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Contacts "));
            f.render_widget(empty, list_area);
        } else {
            let items: Vec<ListItem> = self.rows.iter().map(|row| self.row_item(*row)).collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(" Contacts "))
                .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .highlight_symbol("▸ ");

            let mut state = ListState::default()
                .with_offset(self.offset)
                .with_selected(self.selected);
            f.render_stateful_widget(list, list_area, &mut state);
            self.offset = state.offset();
        }

        if let Some(detail_area) = detail_area {
            details::draw(f, detail_area, self.selected_contact());
        }

        let current = self.current_letter();
        let letters: Vec<Line> = self
            .index
            .iter()
            .map(|entry| {
                let style = if Some(entry.letter) == current {
                    Style::default().fg(Color::Black).bg(ACCENT)
                } else {
                    Style::default().fg(ACCENT)
                };
                Line::from(Span::styled(format!(" {} ", entry.letter), style))
            })
            .collect();
        let sidebar = Paragraph::new(letters)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::LEFT));
        f.render_widget(sidebar, columns[1]);
    }

    fn row_item(&self, row: Row) -> ListItem<'_> {
        match row {
            Row::Header(letter) => ListItem::new(Line::from(Span::styled(
                letter.to_string(),
                Style::default().fg(BANNER).add_modifier(Modifier::BOLD),
            ))),
            Row::Contact(pos) => {
                let Some(contact) = self.records.get(pos) else {
                    return ListItem::new("");
                };
                let number = primary_number(contact)
                    .map(|p| p.number.as_str())
                    .unwrap_or_default();
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<30}", full_name(contact)),
                        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                    Span::styled(number.to_string(), Style::default().fg(ACCENT)),
                ]))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Handle a key; returns a status-bar message when there is something to say.
    pub(crate) fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<String> {
        if self.message.is_some() {
            return None;
        }

        if let KeyCode::Char(c) = code {
            if modifiers.contains(KeyModifiers::ALT) && c.is_ascii_alphabetic() {
                return self.jump_to(c);
            }
        }

        if self.editing {
            match code {
                KeyCode::Esc | KeyCode::Enter => {
                    self.editing = false;
                }
                KeyCode::Backspace => {
                    if self.query.pop().is_some() {
                        self.refresh();
                    }
                }
                KeyCode::Char(c) => {
                    self.query.push(c);
                    self.refresh();
                }
                KeyCode::Up => self.move_up(),
                KeyCode::Down => self.move_down(),
                _ => {}
            }
            return None;
        }

        match code {
            KeyCode::Char('/') => {
                self.editing = true;
                Some("Type to search · Esc or Enter to stop".to_string())
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_down();
                None
            }
            KeyCode::Left => {
                self.jump_relative(false);
                None
            }
            KeyCode::Right => {
                self.jump_relative(true);
                None
            }
            KeyCode::Char('i') => {
                self.show_details = !self.show_details;
                None
            }
            KeyCode::Enter => Some(self.call_selected()),
            KeyCode::Char('w') => Some(self.message_selected()),
            KeyCode::Esc if !self.query.is_empty() => {
                self.query.clear();
                self.refresh();
                Some("Search cleared".to_string())
            }
            _ => None,
        }
    }
}
