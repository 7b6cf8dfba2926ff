//! Player overlay
//!
//! Centered modal showing the selected video or playlist with its canonical
//! YouTube URL. The terminal cannot embed a player, so the overlay surfaces
//! the link to open elsewhere.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::PlayerTarget;

/// Renders the player overlay on top of the browse view.
pub fn render(frame: &mut Frame, target: &PlayerTarget) {
    let area = frame.area();
    let overlay_area = centered_rect(60, 10, area);

    frame.render_widget(Clear, overlay_area);

    let (kind, title, channel, detail, url) = match target {
        PlayerTarget::Video(video) => (
            " Now Playing ",
            video.title.clone(),
            video.channel_title.clone(),
            video
                .view_count
                .map(|views| format!("{} views", views))
                .unwrap_or_default(),
            video.watch_url(),
        ),
        PlayerTarget::Playlist(playlist) => (
            " Playlist ",
            playlist.title.clone(),
            playlist.channel_title.clone(),
            format!("{} videos", playlist.item_count),
            playlist.playlist_url(),
        ),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(channel, Style::default().fg(Color::Gray))),
    ];
    if !detail.is_empty() {
        lines.push(Line::from(Span::styled(
            detail,
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        url,
        Style::default().fg(Color::Cyan),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Esc to close",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(kind)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, overlay_area);
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
