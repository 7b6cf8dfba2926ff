//! Application state management for tubedeck
//!
//! Holds the main application state: the two marquee rows, the playlist grid,
//! focus and selection, and the keyboard handling and per-tick updates that
//! drive them. Focusing a row pauses its marquee; `Space` pins a row paused
//! regardless of focus.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use crate::cli::Config;
use crate::data::{PlaylistItem, VideoItem};
use crate::marquee::{measure_group_width, Marquee, Track, WidthProvider};
use crate::refresh::RefreshMessage;

/// Rendered width of one video card in cells.
pub const CARD_WIDTH: f32 = 30.0;
/// Gap between cards in cells.
pub const CARD_GAP: f32 = 2.0;
/// Rendered width of one playlist card in cells.
pub const PLAYLIST_CARD_WIDTH: u16 = 36;

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    /// Initial loading state while fetching data
    Loading,
    /// Main view: two marquee rows plus the playlist grid
    Browse,
    /// Modal overlay for the selected video or playlist
    Player(PlayerTarget),
}

/// What the player modal is showing
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerTarget {
    Video(VideoItem),
    Playlist(PlaylistItem),
}

/// Which section currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    TopRow,
    LatestRow,
    Playlists,
}

/// Uniform card widths: every video card renders at [`CARD_WIDTH`] cells.
fn card_widths() -> impl WidthProvider {
    |_: usize| CARD_WIDTH
}

/// One auto-scrolling row: the original items, the clone-padded track, and the
/// marquee scroll state, plus a selection cursor over the original group.
#[derive(Debug, Clone)]
pub struct MarqueeRow {
    items: Vec<VideoItem>,
    track: Track<VideoItem>,
    marquee: Marquee,
    /// Selection cursor, an index into the original group
    pub selected: usize,
    /// User-pinned pause (Space), independent of focus
    hold: bool,
}

impl MarqueeRow {
    /// Builds a row from its items, padding the track with clones for the
    /// given viewport width. Returns `None` for an empty item list: the
    /// marquee must never start on a zero-item row.
    pub fn new(items: Vec<VideoItem>, speed: f32, viewport_width: f32) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        let mut track = Track::new(items.clone());
        let widths = card_widths();
        let group_width =
            measure_group_width(&widths, track.len(), track.group_len(), CARD_GAP);
        track.ensure_enough_clones(viewport_width, group_width, &widths, CARD_GAP);
        let marquee = Marquee::new(speed, group_width);
        Some(Self {
            items,
            track,
            marquee,
            selected: 0,
            hold: false,
        })
    }

    /// Re-measures and re-pads after a viewport change, re-normalizing the
    /// scroll offset so the row does not visibly jump.
    pub fn relayout(&mut self, viewport_width: f32) {
        let widths = card_widths();
        let group_width =
            measure_group_width(&widths, self.track.len(), self.track.group_len(), CARD_GAP);
        self.track
            .ensure_enough_clones(viewport_width, group_width, &widths, CARD_GAP);
        self.marquee.remeasure(group_width);
    }

    /// Advances the marquee by `dt` seconds. A focused row is paused, as is a
    /// held one.
    pub fn tick(&mut self, dt: f32, focused: bool) {
        self.marquee.set_paused(focused || self.hold);
        self.marquee.tick(dt);
    }

    /// Current scroll offset in cells.
    pub fn offset(&self) -> f32 {
        self.marquee.offset()
    }

    /// The clone-padded track for rendering.
    pub fn track(&self) -> &Track<VideoItem> {
        &self.track
    }

    /// The original, un-cloned items.
    pub fn items(&self) -> &[VideoItem] {
        &self.items
    }

    pub fn is_held(&self) -> bool {
        self.hold
    }

    pub fn toggle_hold(&mut self) {
        self.hold = !self.hold;
    }

    /// Cancels the row's marquee. Used when the row is replaced on refresh.
    pub fn stop(&mut self) {
        self.marquee.stop();
    }

    /// Moves the selection right, wrapping to the first card.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    /// Moves the selection left, wrapping to the last card.
    pub fn select_prev(&mut self) {
        if self.selected == 0 {
            self.selected = self.items.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// The currently selected item.
    pub fn selected_item(&self) -> Option<&VideoItem> {
        self.items.get(self.selected)
    }
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Which section has focus
    pub focus: Focus,
    /// Top-viewed videos row, absent until loaded or when empty
    pub top_row: Option<MarqueeRow>,
    /// Newest uploads row, absent until loaded or when empty
    pub latest_row: Option<MarqueeRow>,
    /// Featured playlists for the grid
    pub playlists: Vec<PlaylistItem>,
    /// Cursor into the playlist grid
    pub playlist_cursor: usize,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Last loader status or error, shown in the status line
    pub status: Option<String>,
    /// Timestamp of last completed load
    pub last_refresh: Option<DateTime<Local>>,
    /// Flag indicating a reload has been requested
    pub refresh_requested: bool,
    /// Whether a load cycle is currently running
    pub loading: bool,
    /// Viewport width in cells, kept current by resize events
    viewport_width: f32,
    /// Runtime configuration (speed, channels, ordering)
    config: Config,
}

impl App {
    /// Creates a new App in the loading state.
    pub fn new(config: Config) -> Self {
        Self {
            state: AppState::Loading,
            focus: Focus::TopRow,
            top_row: None,
            latest_row: None,
            playlists: Vec::new(),
            playlist_cursor: 0,
            should_quit: false,
            show_help: false,
            status: None,
            last_refresh: None,
            refresh_requested: false,
            loading: false,
            viewport_width: 0.0,
            config,
        }
    }

    /// Cells per row of the playlist grid at the current viewport width.
    pub fn grid_columns(&self) -> usize {
        let per_card = PLAYLIST_CARD_WIDTH as f32 + CARD_GAP;
        ((self.viewport_width + CARD_GAP) / per_card).floor().max(1.0) as usize
    }

    /// Records a new viewport width and re-lays-out both rows.
    pub fn relayout(&mut self, viewport_width: f32) {
        self.viewport_width = viewport_width;
        if let Some(row) = &mut self.top_row {
            row.relayout(viewport_width);
        }
        if let Some(row) = &mut self.latest_row {
            row.relayout(viewport_width);
        }
        if !self.playlists.is_empty() {
            self.playlist_cursor = self.playlist_cursor.min(self.playlists.len() - 1);
        }
    }

    /// Advances both marquees by `dt` seconds of wall time.
    pub fn on_tick(&mut self, dt: f32) {
        let focus = self.focus;
        // Any overlay pauses both rows.
        let overlay = self.show_help || matches!(self.state, AppState::Player(_));
        if let Some(row) = &mut self.top_row {
            row.tick(dt, overlay || focus == Focus::TopRow);
        }
        if let Some(row) = &mut self.latest_row {
            row.tick(dt, overlay || focus == Focus::LatestRow);
        }
    }

    /// Applies a message from the background loader.
    pub fn apply_refresh(&mut self, msg: RefreshMessage) {
        match msg {
            RefreshMessage::RefreshStarted => {
                self.loading = true;
                self.status = Some("Loading channel data...".to_string());
            }
            RefreshMessage::TopLoaded(items) => {
                if let Some(row) = &mut self.top_row {
                    row.stop();
                }
                self.top_row = MarqueeRow::new(items, self.config.speed, self.viewport_width);
                self.enter_browse();
            }
            RefreshMessage::LatestLoaded(items) => {
                if let Some(row) = &mut self.latest_row {
                    row.stop();
                }
                self.latest_row = MarqueeRow::new(items, self.config.speed, self.viewport_width);
                self.enter_browse();
            }
            RefreshMessage::PlaylistsLoaded(items) => {
                self.playlists = items;
                self.playlist_cursor = 0;
                self.enter_browse();
            }
            RefreshMessage::RefreshError(message) => {
                self.status = Some(message);
            }
            RefreshMessage::RefreshCompleted => {
                self.loading = false;
                self.last_refresh = Some(Local::now());
                if self.status.as_deref() == Some("Loading channel data...") {
                    self.status = None;
                }
                self.enter_browse();
            }
        }
    }

    fn enter_browse(&mut self) {
        if self.state == AppState::Loading {
            self.state = AppState::Browse;
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q`: Quit the application
    /// - `Tab`/`BackTab`: Cycle focus across the two rows and the grid
    /// - `Up`/`k`, `Down`/`j`: Move focus (or move within the grid)
    /// - `Left`/`h`, `Right`/`l`: Move the selection in the focused section
    /// - `Enter`: Open the selected video/playlist in the player overlay
    /// - `Space`: Pin/unpin the focused row paused
    /// - `r`: Reload channel data
    /// - `?`: Toggle help overlay
    /// - `Esc`: Close overlay, or quit from the browse view
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match &self.state {
            AppState::Loading => {
                // Only quit is allowed during loading
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            AppState::Browse => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Tab => {
                    self.focus_next();
                }
                KeyCode::BackTab => {
                    self.focus_prev();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_down();
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_up();
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    self.move_right();
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    self.move_left();
                }
                KeyCode::Enter => {
                    if let Some(target) = self.focused_target() {
                        self.state = AppState::Player(target);
                    }
                }
                KeyCode::Char(' ') => {
                    match self.focus {
                        Focus::TopRow => {
                            if let Some(row) = &mut self.top_row {
                                row.toggle_hold();
                            }
                        }
                        Focus::LatestRow => {
                            if let Some(row) = &mut self.latest_row {
                                row.toggle_hold();
                            }
                        }
                        Focus::Playlists => {}
                    }
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::Player(_) => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc | KeyCode::Enter => {
                    self.state = AppState::Browse;
                }
                _ => {}
            },
        }
    }

    /// What Enter would open for the current focus and selection.
    fn focused_target(&self) -> Option<PlayerTarget> {
        match self.focus {
            Focus::TopRow => self
                .top_row
                .as_ref()
                .and_then(|row| row.selected_item())
                .cloned()
                .map(PlayerTarget::Video),
            Focus::LatestRow => self
                .latest_row
                .as_ref()
                .and_then(|row| row.selected_item())
                .cloned()
                .map(PlayerTarget::Video),
            Focus::Playlists => self
                .playlists
                .get(self.playlist_cursor)
                .cloned()
                .map(PlayerTarget::Playlist),
        }
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::TopRow => Focus::LatestRow,
            Focus::LatestRow => Focus::Playlists,
            Focus::Playlists => Focus::TopRow,
        };
    }

    fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::TopRow => Focus::Playlists,
            Focus::LatestRow => Focus::TopRow,
            Focus::Playlists => Focus::LatestRow,
        };
    }

    /// Down moves focus; inside the grid it first moves the cursor a row down.
    fn move_down(&mut self) {
        if self.focus == Focus::Playlists {
            let cols = self.grid_columns();
            let next = self.playlist_cursor + cols;
            if next < self.playlists.len() {
                self.playlist_cursor = next;
                return;
            }
        }
        self.focus_next();
    }

    /// Up moves focus; inside the grid it first moves the cursor a row up.
    fn move_up(&mut self) {
        if self.focus == Focus::Playlists {
            let cols = self.grid_columns();
            if self.playlist_cursor >= cols {
                self.playlist_cursor -= cols;
                return;
            }
        }
        self.focus_prev();
    }

    fn move_right(&mut self) {
        match self.focus {
            Focus::TopRow => {
                if let Some(row) = &mut self.top_row {
                    row.select_next();
                }
            }
            Focus::LatestRow => {
                if let Some(row) = &mut self.latest_row {
                    row.select_next();
                }
            }
            Focus::Playlists => {
                if !self.playlists.is_empty() {
                    self.playlist_cursor = (self.playlist_cursor + 1) % self.playlists.len();
                }
            }
        }
    }

    fn move_left(&mut self) {
        match self.focus {
            Focus::TopRow => {
                if let Some(row) = &mut self.top_row {
                    row.select_prev();
                }
            }
            Focus::LatestRow => {
                if let Some(row) = &mut self.latest_row {
                    row.select_prev();
                }
            }
            Focus::Playlists => {
                if self.playlists.is_empty() {
                } else if self.playlist_cursor == 0 {
                    self.playlist_cursor = self.playlists.len() - 1;
                } else {
                    self.playlist_cursor -= 1;
                }
            }
        }
    }
}
