//! YouTube Data API v3 client
//!
//! Low-quota read access to a channel's uploads and playlists: the uploads
//! playlist is resolved through `channels?part=contentDetails` (no search.list
//! calls), latest uploads come from `playlistItems`, and the top row is ranked
//! by view counts fetched in chunks from the `videos` endpoint.
//!
//! Every fetch is cache-first against the bucketed [`CacheStore`] and falls
//! back to the last cached value, even a stale one, when the network or the
//! API fails. Only when there is no cached value at all does the error reach
//! the caller, whose failure path renders an empty row.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::cache::{Bucket, CacheStore};

use super::{PlaylistItem, VideoItem, MAX_ITEMS, MAX_PLAYLISTS_PER_CHANNEL, TOP_PICK_PER_CHANNEL};

/// Base URL for the YouTube Data API v3
const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Maximum ids per `videos` call, an API limit.
const VIDEOS_CHUNK: usize = 50;

/// Errors that can occur when fetching channel data
#[derive(Debug, Error)]
pub enum YouTubeError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The channel has no resolvable uploads playlist
    #[error("No uploads playlist found for channel {0}")]
    MissingUploadsPlaylist(String),
}

/// Client for the public read endpoints of the YouTube Data API
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    cache: Option<CacheStore>,
}

impl YouTubeClient {
    /// Creates a client with an optional cache store.
    pub fn new(api_key: impl Into<String>, cache: Option<CacheStore>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            cache,
        }
    }

    /// Resolves the id of the channel's uploads playlist, cached per channel.
    pub async fn uploads_playlist_id(&self, channel_id: &str) -> Result<String, YouTubeError> {
        if let Some(cache) = &self.cache {
            if let Some(id) = cache.get::<String>(Bucket::UploadsPlaylist, channel_id) {
                return Ok(id);
            }
        }

        let result = self.fetch_uploads_playlist_id(channel_id).await;
        match result {
            Ok(id) => {
                if let Some(cache) = &self.cache {
                    cache.set(Bucket::UploadsPlaylist, channel_id, &id);
                }
                Ok(id)
            }
            Err(e) => {
                if let Some(cache) = &self.cache {
                    if let Some(id) = cache.get_stale::<String>(Bucket::UploadsPlaylist, channel_id)
                    {
                        return Ok(id);
                    }
                }
                Err(e)
            }
        }
    }

    /// Fetches the channel's newest uploads, at most [`TOP_PICK_PER_CHANNEL`].
    pub async fn fetch_latest(&self, channel_id: &str) -> Result<Vec<VideoItem>, YouTubeError> {
        if let Some(cache) = &self.cache {
            if let Some(mut items) = cache.get::<Vec<VideoItem>>(Bucket::Latest, channel_id) {
                items.truncate(TOP_PICK_PER_CHANNEL);
                return Ok(items);
            }
        }

        match self.fetch_latest_uncached(channel_id).await {
            Ok(items) => {
                if let Some(cache) = &self.cache {
                    cache.set(Bucket::Latest, channel_id, &items);
                }
                Ok(items)
            }
            Err(e) => self.stale_videos_or(Bucket::Latest, channel_id, e),
        }
    }

    /// Fetches the channel's most-viewed recent uploads, ranked by view count,
    /// at most [`TOP_PICK_PER_CHANNEL`].
    pub async fn fetch_top(&self, channel_id: &str) -> Result<Vec<VideoItem>, YouTubeError> {
        if let Some(cache) = &self.cache {
            if let Some(mut items) = cache.get::<Vec<VideoItem>>(Bucket::Top, channel_id) {
                items.truncate(TOP_PICK_PER_CHANNEL);
                return Ok(items);
            }
        }

        match self.fetch_top_uncached(channel_id).await {
            Ok(items) => {
                if let Some(cache) = &self.cache {
                    cache.set(Bucket::Top, channel_id, &items);
                }
                Ok(items)
            }
            Err(e) => self.stale_videos_or(Bucket::Top, channel_id, e),
        }
    }

    /// Fetches the channel's playlists sorted by size then recency, at most
    /// [`MAX_PLAYLISTS_PER_CHANNEL`].
    pub async fn fetch_playlists(
        &self,
        channel_id: &str,
    ) -> Result<Vec<PlaylistItem>, YouTubeError> {
        if let Some(cache) = &self.cache {
            if let Some(items) = cache.get::<Vec<PlaylistItem>>(Bucket::Playlists, channel_id) {
                return Ok(items);
            }
        }

        match self.fetch_playlists_uncached(channel_id).await {
            Ok(items) => {
                if let Some(cache) = &self.cache {
                    cache.set(Bucket::Playlists, channel_id, &items);
                }
                Ok(items)
            }
            Err(e) => {
                if let Some(cache) = &self.cache {
                    if let Some(items) =
                        cache.get_stale::<Vec<PlaylistItem>>(Bucket::Playlists, channel_id)
                    {
                        return Ok(items);
                    }
                }
                Err(e)
            }
        }
    }

    /// Stale-cache fallback shared by the two video rows.
    fn stale_videos_or(
        &self,
        bucket: Bucket,
        channel_id: &str,
        err: YouTubeError,
    ) -> Result<Vec<VideoItem>, YouTubeError> {
        if let Some(cache) = &self.cache {
            if let Some(mut items) = cache.get_stale::<Vec<VideoItem>>(bucket, channel_id) {
                items.truncate(TOP_PICK_PER_CHANNEL);
                return Ok(items);
            }
        }
        Err(err)
    }

    async fn fetch_uploads_playlist_id(&self, channel_id: &str) -> Result<String, YouTubeError> {
        let url = format!(
            "{}/channels?part=contentDetails&id={}&key={}",
            API_BASE_URL, channel_id, self.api_key
        );
        let response: ChannelListResponse = self.get_json(&url).await?;
        response
            .items
            .into_iter()
            .next()
            .and_then(|c| c.content_details.related_playlists.uploads)
            .ok_or_else(|| YouTubeError::MissingUploadsPlaylist(channel_id.to_string()))
    }

    async fn fetch_latest_uncached(&self, channel_id: &str) -> Result<Vec<VideoItem>, YouTubeError> {
        let uploads = self.uploads_playlist_id(channel_id).await?;
        let url = format!(
            "{}/playlistItems?part=snippet,contentDetails&playlistId={}&maxResults={}&key={}",
            API_BASE_URL, uploads, MAX_ITEMS, self.api_key
        );
        let response: PlaylistItemsResponse = self.get_json(&url).await?;
        Ok(map_latest_items(response))
    }

    async fn fetch_top_uncached(&self, channel_id: &str) -> Result<Vec<VideoItem>, YouTubeError> {
        let uploads = self.uploads_playlist_id(channel_id).await?;
        let url = format!(
            "{}/playlistItems?part=contentDetails&playlistId={}&maxResults=50&key={}",
            API_BASE_URL, uploads, self.api_key
        );
        let response: PlaylistItemsResponse = self.get_json(&url).await?;

        let ids: Vec<String> = response
            .items
            .into_iter()
            .filter_map(|it| it.content_details.and_then(|cd| cd.video_id))
            .take(MAX_ITEMS)
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut videos = Vec::new();
        for chunk in ids.chunks(VIDEOS_CHUNK) {
            let url = format!(
                "{}/videos?part=snippet,statistics&id={}&key={}",
                API_BASE_URL,
                chunk.join(","),
                self.api_key
            );
            let response: VideoListResponse = self.get_json(&url).await?;
            videos.extend(response.items);
        }

        Ok(map_top_videos(videos))
    }

    async fn fetch_playlists_uncached(
        &self,
        channel_id: &str,
    ) -> Result<Vec<PlaylistItem>, YouTubeError> {
        let url = format!(
            "{}/playlists?part=snippet,contentDetails&channelId={}&maxResults=50&key={}",
            API_BASE_URL, channel_id, self.api_key
        );
        let response: PlaylistListResponse = self.get_json(&url).await?;
        Ok(map_playlists(response))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, YouTubeError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/* ------------------------- response mapping ------------------------- */

/// Maps a `playlistItems` response into latest-upload cards, keeping list
/// order, dropping items without a video id, capped per channel.
fn map_latest_items(response: PlaylistItemsResponse) -> Vec<VideoItem> {
    response
        .items
        .into_iter()
        .filter_map(|it| {
            let video_id = it.content_details.and_then(|cd| cd.video_id)?;
            let snippet = it.snippet.unwrap_or_default();
            Some(VideoItem {
                video_id,
                title: snippet.title,
                channel_title: snippet.channel_title,
                channel_id: snippet.channel_id,
                view_count: None,
            })
        })
        .take(TOP_PICK_PER_CHANNEL)
        .collect()
}

/// Ranks `videos` resources by view count descending and maps the head of the
/// list into cards.
fn map_top_videos(mut videos: Vec<VideoResource>) -> Vec<VideoItem> {
    videos.sort_by(|a, b| b.views().cmp(&a.views()));
    videos
        .into_iter()
        .take(TOP_PICK_PER_CHANNEL)
        .map(|v| {
            let views = v.views();
            let snippet = v.snippet.unwrap_or_default();
            VideoItem {
                video_id: v.id,
                title: snippet.title,
                channel_title: snippet.channel_title,
                channel_id: snippet.channel_id,
                view_count: Some(views),
            }
        })
        .collect()
}

/// Maps a `playlists` response into grid cards sorted by item count, then by
/// publish date, newest first; capped per channel.
fn map_playlists(response: PlaylistListResponse) -> Vec<PlaylistItem> {
    let mut mapped: Vec<PlaylistItem> = response
        .items
        .into_iter()
        .map(|p| {
            let snippet = p.snippet.unwrap_or_default();
            let item_count = p.content_details.map(|cd| cd.item_count).unwrap_or(0);
            PlaylistItem {
                id: p.id,
                title: snippet.title,
                channel_title: snippet.channel_title,
                channel_id: snippet.channel_id,
                item_count,
                thumbnail_url: snippet.thumbnails.best_url(),
                published_at: snippet.published_at,
            }
        })
        .collect();
    mapped.sort_by(|a, b| {
        b.item_count
            .cmp(&a.item_count)
            .then_with(|| b.published_at.cmp(&a.published_at))
    });
    mapped.truncate(MAX_PLAYLISTS_PER_CHANNEL);
    mapped
}

/* --------------------------- API responses --------------------------- */

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelResource {
    content_details: ChannelContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelContentDetails {
    related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
struct RelatedPlaylists {
    uploads: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItemResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemResource {
    snippet: Option<Snippet>,
    content_details: Option<ItemContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemContentDetails {
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    channel_id: String,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    maxres: Option<Thumbnail>,
    standard: Option<Thumbnail>,
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

impl Thumbnails {
    /// Highest-resolution URL available, or empty.
    fn best_url(&self) -> String {
        [
            &self.maxres,
            &self.standard,
            &self.high,
            &self.medium,
            &self.default,
        ]
        .into_iter()
        .flatten()
        .next()
        .map(|t| t.url.clone())
        .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoResource>,
}

#[derive(Debug, Deserialize)]
struct VideoResource {
    id: String,
    snippet: Option<Snippet>,
    statistics: Option<VideoStatistics>,
}

impl VideoResource {
    /// Parsed view count; the API returns it as a decimal string.
    fn views(&self) -> u64 {
        self.statistics
            .as_ref()
            .and_then(|s| s.view_count.as_deref())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistListResponse {
    #[serde(default)]
    items: Vec<PlaylistResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistResource {
    id: String,
    snippet: Option<Snippet>,
    content_details: Option<PlaylistContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistContentDetails {
    #[serde(default)]
    item_count: u64,
}
