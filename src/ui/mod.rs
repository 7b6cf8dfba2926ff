//! UI rendering module for tubedeck
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components. The browse screen
//! stacks the two marquee rows above the playlist grid; the player and help
//! overlays render on top.

pub mod help_overlay;
pub mod marquee_row;
pub mod player;
pub mod playlist_grid;

pub use help_overlay::render as render_help_overlay;
pub use player::render as render_player;

use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, AppState, Focus};

/// Rows of terminal cells given to each marquee row section.
const ROW_HEIGHT: u16 = 5;

/// Top-level render dispatch for the current application state.
pub fn render(frame: &mut Frame, app: &App) {
    match &app.state {
        AppState::Loading => render_loading(frame, app),
        AppState::Browse => render_browse(frame, app),
        AppState::Player(target) => {
            render_browse(frame, app);
            render_player(frame, target);
        }
    }

    if app.show_help {
        render_help_overlay(frame);
    }
}

/// Renders the initial loading screen.
fn render_loading(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let mut lines = vec![
        Line::from(Span::styled(
            "TUBEDECK",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Loading channel data..."),
    ];
    if let Some(status) = &app.status {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(lines.len() as u16),
            Constraint::Min(0),
        ])
        .split(area);

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, vertical[1]);
}

/// Renders the main browse screen: header, both rows, grid, status line.
fn render_browse(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),          // Header
            Constraint::Length(ROW_HEIGHT), // Top videos row
            Constraint::Length(ROW_HEIGHT), // Latest uploads row
            Constraint::Min(3),             // Playlist grid
            Constraint::Length(1),          // Status / key hints
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    marquee_row::render(
        frame,
        app.top_row.as_ref(),
        chunks[1],
        " Top Videos ",
        app.focus == Focus::TopRow,
    );
    marquee_row::render(
        frame,
        app.latest_row.as_ref(),
        chunks[2],
        " Latest Uploads ",
        app.focus == Focus::LatestRow,
    );
    playlist_grid::render(frame, app, chunks[3]);
    render_status_line(frame, app, chunks[4]);
}

/// Renders the title bar with the load state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "TUBEDECK",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            Local::now().format("%a %b %d, %H:%M").to_string(),
            Style::default().fg(Color::White),
        ),
    ];
    if app.loading {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "loading...",
            Style::default().fg(Color::Yellow),
        ));
    }

    let width = area.width as usize;
    let separator = "\u{2500}".repeat(width);
    let lines = vec![
        Line::from(spans),
        Line::from(Span::styled(separator, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the bottom line: key hints, last error, and data freshness.
fn render_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Section  "),
        Span::styled("\u{2190}/\u{2192}", Style::default().fg(Color::Yellow)),
        Span::raw(" Select  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Open  "),
        Span::styled("Space", Style::default().fg(Color::Yellow)),
        Span::raw(" Hold  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" Reload  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" Help  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ];

    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!(" \u{2502} {}", status),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(last_refresh) = app.last_refresh {
        let elapsed = Local::now() - last_refresh;
        let mins_ago = elapsed.num_minutes();
        let freshness = if mins_ago < 1 {
            " \u{2502} Data: just now".to_string()
        } else if mins_ago < 60 {
            format!(" \u{2502} Data: {}m ago", mins_ago)
        } else {
            format!(" \u{2502} Data: {}h ago", elapsed.num_hours())
        };
        spans.push(Span::styled(freshness, Style::default().fg(Color::DarkGray)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Config;
    use crate::data::{TopOrder, VideoItem};
    use crate::refresh::RefreshMessage;
    use ratatui::{backend::TestBackend, Terminal};

    fn test_app() -> App {
        App::new(Config {
            channels: vec!["UCtest".to_string()],
            api_key: "k".to_string(),
            ttl_hours: 12,
            speed: 6.0,
            top_order: TopOrder::Ranked,
            no_cache: true,
        })
    }

    fn videos(n: usize) -> Vec<VideoItem> {
        (0..n)
            .map(|i| VideoItem {
                video_id: format!("v{}", i),
                title: format!("Video number {}", i),
                channel_title: "Test Channel".to_string(),
                channel_id: "UCtest".to_string(),
                view_count: None,
            })
            .collect()
    }

    #[test]
    fn test_loading_screen_renders() {
        let app = test_app();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|frame| render(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(content.contains("TUBEDECK"));
        assert!(content.contains("Loading"));
    }

    #[test]
    fn test_browse_screen_renders_sections_and_hints() {
        let mut app = test_app();
        app.relayout(80.0);
        app.apply_refresh(RefreshMessage::TopLoaded(videos(3)));
        app.apply_refresh(RefreshMessage::LatestLoaded(videos(2)));
        app.apply_refresh(RefreshMessage::RefreshCompleted);

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(content.contains("Top Videos"));
        assert!(content.contains("Latest Uploads"));
        assert!(content.contains("Playlists"));
        assert!(content.contains("Quit"));
    }

    #[test]
    fn test_status_line_shows_error() {
        let mut app = test_app();
        app.relayout(80.0);
        app.apply_refresh(RefreshMessage::TopLoaded(videos(1)));
        app.apply_refresh(RefreshMessage::RefreshError("quota exceeded".to_string()));

        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(content.contains("quota exceeded"));
    }
}
