//! Core data models for tubedeck
//!
//! Plain records for videos and playlists as rendered on the rows and grid,
//! plus the assembly rules that combine per-channel fetch results into one
//! row (ordering, caps, and the configurable top-row order).

pub mod youtube;

pub use youtube::{YouTubeClient, YouTubeError};

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// How many uploads to inspect per channel when ranking by views.
pub const MAX_ITEMS: usize = 20;
/// Cards contributed by each channel to a row.
pub const TOP_PICK_PER_CHANNEL: usize = 8;
/// Maximum cards shown in one row across all channels.
pub const MAX_TOTAL: usize = 24;
/// Playlists kept per channel.
pub const MAX_PLAYLISTS_PER_CHANNEL: usize = 3;
/// Maximum playlists shown in the grid across all channels.
pub const MAX_PLAYLISTS_TOTAL: usize = 12;

/// A video card: the minimum needed to render it and open its watch URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoItem {
    /// YouTube video id
    pub video_id: String,
    /// Video title
    pub title: String,
    /// Display name of the owning channel
    pub channel_title: String,
    /// Id of the owning channel
    pub channel_id: String,
    /// View count, present only for items fetched through the statistics
    /// endpoint (the "top" row)
    #[serde(default)]
    pub view_count: Option<u64>,
}

impl VideoItem {
    /// Canonical watch URL for the video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

/// A playlist card for the featured-playlists grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// YouTube playlist id
    pub id: String,
    /// Playlist title
    pub title: String,
    /// Display name of the owning channel
    pub channel_title: String,
    /// Id of the owning channel
    pub channel_id: String,
    /// Number of videos in the playlist
    pub item_count: u64,
    /// RFC 3339 publish timestamp, used as the sort tiebreaker
    #[serde(default)]
    pub published_at: String,
    /// Best available thumbnail URL (may be empty)
    #[serde(default)]
    pub thumbnail_url: String,
}

impl PlaylistItem {
    /// Canonical playlist URL.
    pub fn playlist_url(&self) -> String {
        format!("https://www.youtube.com/playlist?list={}", self.id)
    }
}

/// Ordering policy for the top row when the combined list exceeds [`MAX_TOTAL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TopOrder {
    /// Deterministic top-N by view count across channels
    #[default]
    Ranked,
    /// Random sample across channels
    Shuffled,
}

/// Combines per-channel "latest" results into one row: list order, capped at
/// [`MAX_TOTAL`].
pub fn assemble_latest_row(mut items: Vec<VideoItem>) -> Vec<VideoItem> {
    items.truncate(MAX_TOTAL);
    items
}

/// Combines per-channel "top" results into one row.
///
/// Under the cap the combined list is kept as-is. Over the cap the order policy
/// applies: `Ranked` sorts by view count descending before truncating,
/// `Shuffled` takes a random sample.
pub fn assemble_top_row(mut items: Vec<VideoItem>, order: TopOrder) -> Vec<VideoItem> {
    if items.len() <= MAX_TOTAL {
        return items;
    }
    match order {
        TopOrder::Ranked => {
            items.sort_by(|a, b| b.view_count.unwrap_or(0).cmp(&a.view_count.unwrap_or(0)));
        }
        TopOrder::Shuffled => {
            items.shuffle(&mut rand::thread_rng());
        }
    }
    items.truncate(MAX_TOTAL);
    items
}

/// Caps the combined playlist list for the grid.
pub fn assemble_playlists(mut items: Vec<PlaylistItem>) -> Vec<PlaylistItem> {
    items.truncate(MAX_PLAYLISTS_TOTAL);
    items
}
