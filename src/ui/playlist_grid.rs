//! Featured playlists grid rendering
//!
//! Static grid of playlist cards below the two marquee rows. The grid reflows
//! with the terminal width; the cursor highlight follows the app's grid
//! cursor when the section has focus.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Focus, CARD_GAP, PLAYLIST_CARD_WIDTH};
use crate::data::PlaylistItem;

/// Lines of text per playlist card.
const CARD_HEIGHT: u16 = 3;

/// Renders the playlist grid section.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Playlists;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(" Playlists ")
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.playlists.is_empty() {
        let placeholder =
            Paragraph::new("No playlists").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(placeholder, inner);
        return;
    }

    let cols = app.grid_columns().max(1);
    let step_x = PLAYLIST_CARD_WIDTH + CARD_GAP as u16;

    for (i, playlist) in app.playlists.iter().enumerate() {
        let col = (i % cols) as u16;
        let row = (i / cols) as u16;
        let x = inner.x + col * step_x;
        let y = inner.y + row * CARD_HEIGHT;
        if y + CARD_HEIGHT > inner.bottom() || x >= inner.right() {
            continue;
        }
        let width = PLAYLIST_CARD_WIDTH.min(inner.right() - x);
        let card_area = Rect::new(x, y, width, CARD_HEIGHT);
        let selected = focused && i == app.playlist_cursor;
        frame.render_widget(playlist_card(playlist, selected), card_area);
    }
}

/// Builds the three-line paragraph for one playlist card.
fn playlist_card(playlist: &PlaylistItem, selected: bool) -> Paragraph<'static> {
    let title_style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if selected { "\u{25B8} " } else { "  " };

    let lines = vec![
        Line::from(vec![
            Span::styled(cursor.to_string(), title_style),
            Span::styled(playlist.title.clone(), title_style),
        ]),
        Line::from(Span::styled(
            format!("  {}", playlist.channel_title),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("  {} videos", playlist.item_count),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    Paragraph::new(lines)
}
