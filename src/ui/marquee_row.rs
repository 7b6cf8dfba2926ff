//! Auto-scrolling video row rendering
//!
//! Draws one marquee row as a strip of fixed-width cards shifted left by the
//! row's scroll offset. Cards are written directly into the buffer, clipped at
//! the section edges, so a card can be half off-screen on either side while
//! the track wraps seamlessly underneath.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

use crate::app::{MarqueeRow, CARD_GAP, CARD_WIDTH};
use crate::data::VideoItem;

/// Renders one row section: the bordered block plus the scrolling cards, or a
/// placeholder when the row has no data.
pub fn render(
    frame: &mut Frame,
    row: Option<&MarqueeRow>,
    area: Rect,
    title: &str,
    focused: bool,
) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match row {
        Some(row) => {
            frame.render_widget(MarqueeRowWidget { row, focused }, inner);
        }
        None => {
            let placeholder =
                Paragraph::new("No videos").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(placeholder, inner);
        }
    }
}

/// Widget drawing the clone-padded track at the current offset.
struct MarqueeRowWidget<'a> {
    row: &'a MarqueeRow,
    focused: bool,
}

impl<'a> Widget for MarqueeRowWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let track = self.row.track();
        let group_len = track.group_len();
        let offset = self.row.offset();
        let step = CARD_WIDTH + CARD_GAP;

        for (i, card) in track.cards().iter().enumerate() {
            let x0 = area.x as f32 + i as f32 * step - offset;
            if x0 + CARD_WIDTH <= area.left() as f32 || x0 >= area.right() as f32 {
                continue;
            }
            let selected =
                self.focused && group_len > 0 && i % group_len == self.row.selected;
            draw_card(buf, area, x0.round() as i32, card, selected, self.row.is_held());
        }
    }
}

/// Draws one card's lines, clipped to `area`.
fn draw_card(
    buf: &mut Buffer,
    area: Rect,
    x0: i32,
    card: &VideoItem,
    selected: bool,
    held: bool,
) {
    let width = CARD_WIDTH as usize;

    let title_style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let meta_style = Style::default().fg(Color::DarkGray);

    let marker = if selected {
        if held {
            "\u{25B8} [held]"
        } else {
            "\u{25B8}"
        }
    } else {
        ""
    };

    draw_clipped(buf, area, x0, area.top(), &truncate(&card.title, width), title_style);
    if area.height > 1 {
        draw_clipped(
            buf,
            area,
            x0,
            area.top() + 1,
            &truncate(&card.channel_title, width),
            meta_style,
        );
    }
    if area.height > 2 {
        let detail = match card.view_count {
            Some(views) => format!("{} {}", format_views(views), marker),
            None => marker.to_string(),
        };
        draw_clipped(buf, area, x0, area.top() + 2, detail.trim_end(), meta_style);
    }
}

/// Writes `text` starting at column `x0`, dropping characters that fall
/// outside the area. `x0` may be negative for cards entering from the left.
fn draw_clipped(buf: &mut Buffer, area: Rect, x0: i32, y: u16, text: &str, style: Style) {
    for (j, ch) in text.chars().enumerate() {
        let x = x0 + j as i32;
        if x < area.left() as i32 || x >= area.right() as i32 {
            continue;
        }
        if let Some(cell) = buf.cell_mut((x as u16, y)) {
            cell.set_char(ch).set_style(style);
        }
    }
}

/// Truncates a string to `max` characters, with an ellipsis when cut.
fn truncate(text: &str, max: usize) -> String {
    let count = text.chars().count();
    if count <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}

/// Compact view-count formatting, "1.2M" style.
fn format_views(views: u64) -> String {
    if views >= 1_000_000 {
        format!("{:.1}M views", views as f64 / 1_000_000.0)
    } else if views >= 1_000 {
        format!("{:.1}K views", views as f64 / 1_000.0)
    } else {
        format!("{} views", views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn videos(n: usize) -> Vec<VideoItem> {
        (0..n)
            .map(|i| VideoItem {
                video_id: format!("v{}", i),
                title: format!("Card number {}", i),
                channel_title: "Chan".to_string(),
                channel_id: "UC".to_string(),
                view_count: Some(1_500),
            })
            .collect()
    }

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_row_renders_first_card_at_zero_offset() {
        let row = MarqueeRow::new(videos(3), 6.0, 80.0).unwrap();
        let area = Rect::new(0, 0, 80, 3);
        let mut buf = Buffer::empty(area);
        MarqueeRowWidget { row: &row, focused: false }.render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Card number 0"));
        assert!(text.contains("Chan"));
        assert!(text.contains("1.5K views"));
    }

    #[test]
    fn test_offset_shifts_cards_left() {
        let mut row = MarqueeRow::new(videos(3), 10.0, 80.0).unwrap();
        row.tick(1.0, false); // offset 10
        let area = Rect::new(0, 0, 80, 3);
        let mut buf = Buffer::empty(area);
        MarqueeRowWidget { row: &row, focused: false }.render(area, &mut buf);

        // Card 0 starts at column -10, so its first visible character is the
        // 11th of the title line.
        let first_line: String = (0..10u16)
            .map(|x| buf.cell((x, 0u16)).unwrap().symbol())
            .collect::<Vec<_>>()
            .join("");
        assert!(
            !first_line.contains("Card number"),
            "left edge of card 0 must be clipped, got {:?}",
            first_line
        );
        let text = buffer_text(&buf);
        assert!(text.contains("Card number 1"));
    }

    #[test]
    fn test_selection_marker_only_when_focused() {
        let row = MarqueeRow::new(videos(2), 6.0, 80.0).unwrap();
        let area = Rect::new(0, 0, 80, 3);

        let mut buf = Buffer::empty(area);
        MarqueeRowWidget { row: &row, focused: true }.render(area, &mut buf);
        assert!(buffer_text(&buf).contains('\u{25B8}'));

        let mut buf = Buffer::empty(area);
        MarqueeRowWidget { row: &row, focused: false }.render(area, &mut buf);
        assert!(!buffer_text(&buf).contains('\u{25B8}'));
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        let cut = truncate("a very long title that will not fit", 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('\u{2026}'));
    }

    #[test]
    fn test_format_views_scales() {
        assert_eq!(format_views(999), "999 views");
        assert_eq!(format_views(1_500), "1.5K views");
        assert_eq!(format_views(2_300_000), "2.3M views");
    }

    #[test]
    fn test_degenerate_area_is_noop() {
        let row = MarqueeRow::new(videos(2), 6.0, 80.0).unwrap();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        MarqueeRowWidget { row: &row, focused: false }.render(area, &mut buf);
    }
}
