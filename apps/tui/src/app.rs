//! Core TUI application state and event loop.

use std::io;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use contactbook_core::{Dialer, Session};

use crate::screens::contacts::ContactsScreen;
use crate::widgets::status_bar;

const BROWSE_HINT: &str = "/ search · Enter call · w message · i details · ? help · q quit";
const EDIT_HINT: &str = "Esc/Enter done · ↑/↓ move";

/// Application state.
pub(crate) struct App {
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Status message shown in bottom bar.
    pub status: String,
    /// Whether help overlay is visible.
    pub show_help: bool,
    pub contacts: ContactsScreen,
}

impl App {
    pub(crate) fn new(session: Session, dialer: Dialer) -> Self {
        let status = match session.message() {
            Some(msg) => msg.to_string(),
            None => format!("{} contacts loaded — press ? for help", session.records().len()),
        };
        Self {
            should_quit: false,
            status,
            show_help: false,
            contacts: ContactsScreen::new(session, dialer),
        }
    }
}

/// Entry point — sets up terminal, runs event loop, restores terminal.
pub(crate) fn run(session: Session, dialer: Dialer) -> Result<()> {
    // Setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, App::new(session, dialer));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, &mut app))?;

        // Poll for events with 100ms timeout for responsive UI
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let editing = app.contacts.is_editing();

    // Global keybindings
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') if !editing => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') if !editing => {
            app.show_help = !app.show_help;
            return;
        }
        _ => {}
    }

    // If help is showing, consume any key to dismiss
    if app.show_help {
        app.show_help = false;
        return;
    }

    if let Some(status) = app.contacts.handle_key(code, modifiers) {
        app.status = status;
    }
}

fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    let outer = Block::default().borders(Borders::ALL).title(" ContactBook ");
    let inner = outer.inner(chunks[0]);
    f.render_widget(outer, chunks[0]);
    app.contacts.draw(f, inner);

    let hint = if app.contacts.is_editing() {
        EDIT_HINT
    } else {
        BROWSE_HINT
    };
    let bar = status_bar(&app.status, hint, chunks[1].width);
    f.render_widget(bar, chunks[1]);

    if app.show_help {
        draw_help_overlay(f);
    }
}

fn draw_help_overlay(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());

    let help_text = vec![
        Line::from("Keybindings").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("  ↑/↓ j/k      Move between contacts"),
        Line::from("  ←/→          Previous/next letter"),
        Line::from("  Alt-<letter> Jump to letter"),
        Line::from("  /            Search by name"),
        Line::from("  Esc          Clear search"),
        Line::from("  Enter        Call URI for selected contact"),
        Line::from("  w            Message URI for selected contact"),
        Line::from("  i            Toggle details panel"),
        Line::from("  ?            Toggle this help"),
        Line::from("  q / Ctrl-C   Quit"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help — press any key to close ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));

    // Clear background
    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

/// Create a centered rectangle with percentage width and height.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(r);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);

    center
}

#[cfg(test)]
mod tests {
    use contactbook_shared::AppConfig;

    use super::*;

    fn app() -> App {
        let dialer = Dialer::from_config(&AppConfig::default()).expect("dialer");
        App::new(Session::Empty, dialer)
    }

    #[test]
    fn empty_session_status() {
        assert_eq!(app().status, "No contacts found");
    }

    #[test]
    fn q_quits_outside_search() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(app.should_quit);
    }

    #[test]
    fn help_toggles_and_any_key_dismisses() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('?'), KeyModifiers::NONE);
        assert!(app.show_help);
        handle_key(&mut app, KeyCode::Down, KeyModifiers::NONE);
        assert!(!app.show_help);
    }

    #[test]
    fn centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 60, outer);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 30);
        assert_eq!(inner.x, 20);
    }
}
