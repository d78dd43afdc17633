//! Main application state and TUI event loop for the dashboard.
//!
//! [`App`] owns the theme, the active tab, and the last received refresh
//! event. It drives the live event loop: draw, poll the keyboard, drain the
//! refresh channel. Rendering happens once per loop pass on current state;
//! there is no implicit reactivity.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Constraint,
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;

use dashboard_core::models::ChartVariant;
use dashboard_runtime::orchestrator::RefreshEvent;

use crate::area_view;
use crate::components::header::Header;
use crate::themes::Theme;

// ── Tab ───────────────────────────────────────────────────────────────────────

/// The two dashboard tabs, one per chart variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Running totals across the shift.
    Cumulative,
    /// Per-hour realized vs. planned.
    Hourly,
}

impl Tab {
    /// Tab label as shown in the tab bar and header.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Cumulative => "Acumulado",
            Tab::Hourly => "Hora a Hora",
        }
    }

    /// The chart variant this tab renders.
    pub fn variant(&self) -> ChartVariant {
        match self {
            Tab::Cumulative => ChartVariant::Cumulative,
            Tab::Hourly => ChartVariant::Hourly,
        }
    }

    /// The other tab.
    pub fn toggled(&self) -> Tab {
        match self {
            Tab::Cumulative => Tab::Hourly,
            Tab::Hourly => Tab::Cumulative,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Currently selected tab.
    pub tab: Tab,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    /// Most recent refresh event, `None` until the first one arrives.
    pub last_event: Option<RefreshEvent>,
}

impl App {
    /// Construct a new application with the given theme name.
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            tab: Tab::Cumulative,
            should_quit: false,
            last_event: None,
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the live dashboard TUI, receiving refresh events from `rx`.
    ///
    /// Uses `crossterm::event::poll` (synchronous, with a 250 ms timeout) so
    /// that the terminal event loop stays on the current thread while data
    /// updates arrive on the async channel via `try_recv`.
    ///
    /// The loop exits on `q`, `Q`, or `Ctrl+C`.
    pub async fn run_live(mut self, mut rx: mpsc::Receiver<RefreshEvent>) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard events with a short timeout so we don't block.
            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            // Drain any pending refresh events (non-blocking).
            loop {
                match rx.try_recv() {
                    Ok(event) => self.update_from_event(event),
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        self.should_quit = true;
                        break;
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── State transitions ─────────────────────────────────────────────────────

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Left | KeyCode::Right => self.tab = self.tab.toggled(),
            KeyCode::Char('1') => self.tab = Tab::Cumulative,
            KeyCode::Char('2') => self.tab = Tab::Hourly,
            _ => {}
        }
    }

    /// Store an incoming refresh event for the next draw.
    pub fn update_from_event(&mut self, event: RefreshEvent) {
        self.last_event = Some(event);
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let [header_area, tabs_area, body] = ratatui::layout::Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .areas(frame.area());

        // Header: view label, refresh time, degraded-fetch warning.
        let updated = self.last_event.as_ref().map(|e| {
            e.emitted_at
                .with_timezone(&chrono::Local)
                .format("%H:%M:%S")
                .to_string()
        });
        let warning = self
            .last_event
            .as_ref()
            .and_then(|e| e.last_error.as_deref());
        let header = Header::new(
            self.tab.title(),
            updated.as_deref(),
            warning,
            &self.theme,
        );
        frame.render_widget(
            Paragraph::new(Text::from(header.to_lines())),
            header_area,
        );

        frame.render_widget(
            Paragraph::new(Text::from(vec![self.tab_line(), Line::from("")])),
            tabs_area,
        );

        match self.last_event.as_ref() {
            None => area_view::render_waiting(frame, body, &self.theme),
            Some(event) => match event.snapshot.as_ref() {
                Some(snapshot) => area_view::render_grid(
                    frame,
                    body,
                    snapshot,
                    self.tab.variant(),
                    &self.theme,
                ),
                None => {
                    let error = event.last_error.as_deref().unwrap_or("motivo desconhecido");
                    area_view::render_load_error(frame, body, error, &self.theme);
                }
            },
        }
    }

    /// Build the tab bar line with the active tab highlighted.
    fn tab_line(&self) -> Line<'_> {
        let style_for = |tab: Tab| {
            if tab == self.tab {
                self.theme.tab_active
            } else {
                self.theme.tab_inactive
            }
        };

        Line::from(vec![
            Span::styled(
                format!(" 1 {} ", Tab::Cumulative.title()),
                style_for(Tab::Cumulative),
            ),
            Span::styled("│", self.theme.separator),
            Span::styled(
                format!(" 2 {} ", Tab::Hourly.title()),
                style_for(Tab::Hourly),
            ),
        ])
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
