//! TUI Dashboard using ratatui.

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tracing::debug;

use crate::render::{View, LOADING_TEXT};

/// TUI Dashboard.
pub struct Dashboard {
    title: String,
    source: String,
    tick_ms: u64,
}

impl Dashboard {
    /// Create a new dashboard.
    pub fn new(title: impl Into<String>, tick_ms: u64) -> Self {
        Self {
            title: title.into(),
            source: String::new(),
            tick_ms,
        }
    }

    /// Label shown next to the title, usually the endpoint URL.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Run the dashboard until the user quits.
    ///
    /// `next_view` is polled every tick and returns a new view only when the
    /// underlying state changed.
    pub fn run<F>(&self, mut next_view: F) -> io::Result<()>
    where
        F: FnMut() -> Option<View>,
    {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal, &mut next_view);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    fn run_loop<B, F>(&self, terminal: &mut Terminal<B>, next_view: &mut F) -> io::Result<()>
    where
        B: Backend,
        F: FnMut() -> Option<View>,
    {
        let mut view = View::Loading;
        loop {
            if let Some(next) = next_view() {
                view = next;
            }
            terminal.draw(|f| self.draw(f, &view))?;

            if event::poll(Duration::from_millis(self.tick_ms))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press
                        && (key.code == KeyCode::Char('q') || key.code == KeyCode::Esc)
                    {
                        debug!("dashboard closed by user");
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Draw one frame for `view`.
    pub fn draw(&self, frame: &mut Frame, view: &View) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Metrics card
                Constraint::Length(3), // Status
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_metrics(frame, chunks[1], view);
        self.render_status(frame, chunks[2], view);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            self.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if !self.source.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.source.as_str(),
                Style::default().fg(Color::Cyan),
            ));
        }
        spans.push(Span::raw(" | Press 'q' to quit"));

        let header = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn render_metrics(&self, frame: &mut Frame, area: Rect, view: &View) {
        let lines: Vec<Line> = match view {
            View::Loading => vec![Line::from(Span::styled(
                LOADING_TEXT,
                Style::default().fg(Color::Yellow),
            ))],
            View::Metrics { rows, .. } => rows
                .iter()
                .map(|row| {
                    Line::from(vec![
                        Span::styled(
                            row.name.as_str(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(": "),
                        Span::raw(row.value.as_str()),
                    ])
                })
                .collect(),
        };

        let card =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Metrics"));
        frame.render_widget(card, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, view: &View) {
        let status = match view {
            View::Loading => Line::from(Span::styled(
                "Waiting for first snapshot",
                Style::default().fg(Color::DarkGray),
            )),
            View::Metrics { rows, updated_at } => Line::from(vec![
                Span::raw("Metrics: "),
                Span::styled(format!("{}", rows.len()), Style::default().fg(Color::Green)),
                Span::raw("  |  Updated: "),
                Span::raw(updated_at.format("%H:%M:%S UTC").to_string()),
            ]),
        };

        let paragraph =
            Paragraph::new(status).block(Block::default().borders(Borders::ALL).title("Status"));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use chrono::{TimeZone, Utc};
    use metrics_core::types::{DisplayState, MetricsSnapshot};
    use ratatui::backend::TestBackend;

    fn screen(dashboard: &Dashboard, view: &View) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 14)).unwrap();
        terminal.draw(|f| dashboard.draw(f, view)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_draw_loading() {
        let dashboard = Dashboard::new("Metrics Dashboard", 250);
        let text = screen(&dashboard, &View::Loading);

        assert!(text.contains("Metrics Dashboard"));
        assert_eq!(text.matches(LOADING_TEXT).count(), 1);
        assert!(text.contains("Waiting for first snapshot"));
    }

    #[test]
    fn test_draw_metrics() {
        let received = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap();
        let snapshot = MetricsSnapshot::from_json(br#"{"cpu": 42, "status": "ok"}"#)
            .unwrap()
            .with_received_at(received);
        let view = render(&DisplayState::from(snapshot));
        let dashboard =
            Dashboard::new("Metrics Dashboard", 250).with_source("http://localhost:8000");

        let text = screen(&dashboard, &view);

        assert!(text.contains("http://localhost:8000"));
        assert!(text.contains("cpu: 42"));
        assert!(text.contains("status: ok"));
        assert!(text.contains("Updated: 12:30:05 UTC"));
        assert!(!text.contains(LOADING_TEXT));
    }

    #[test]
    fn test_header_without_source() {
        let dashboard = Dashboard::new("Metrics", 250);
        let text = screen(&dashboard, &View::Loading);

        assert!(text.contains("Metrics | Press 'q' to quit"));
    }
}
