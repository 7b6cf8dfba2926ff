//! Background data loading
//!
//! Loads the three content sections (top videos, newest uploads, featured
//! playlists) in a spawned task and reports results to the main application
//! over a tokio channel, so the UI keeps ticking while the network is slow.
//!
//! Channels within one section are fetched sequentially in configured order;
//! the three sections run concurrently with each other. A failed channel
//! surfaces as a status message and contributes nothing to its row.

use std::pin::Pin;

use futures::future::join_all;
use futures::Future;
use tokio::sync::mpsc;

use crate::data::{
    assemble_latest_row, assemble_playlists, assemble_top_row, PlaylistItem, TopOrder, VideoItem,
    YouTubeClient,
};

/// Messages sent from the background loader to the main app
#[derive(Debug, Clone)]
pub enum RefreshMessage {
    /// A load cycle has started
    RefreshStarted,
    /// The top-videos row is ready (may be empty)
    TopLoaded(Vec<VideoItem>),
    /// The newest-uploads row is ready (may be empty)
    LatestLoaded(Vec<VideoItem>),
    /// The featured-playlists grid is ready (may be empty)
    PlaylistsLoaded(Vec<PlaylistItem>),
    /// A channel fetch failed; the row continues without it
    RefreshError(String),
    /// All three sections finished
    RefreshCompleted,
}

/// Spawns a load cycle for all sections and returns immediately.
///
/// Results and errors arrive on `tx`; the task sends `RefreshCompleted` last.
pub fn spawn_load(
    client: YouTubeClient,
    channels: Vec<String>,
    top_order: TopOrder,
    tx: mpsc::UnboundedSender<RefreshMessage>,
) {
    tokio::spawn(async move {
        let _ = tx.send(RefreshMessage::RefreshStarted);

        let top = async {
            let mut all = Vec::new();
            for channel_id in &channels {
                match client.fetch_top(channel_id).await {
                    Ok(items) => all.extend(items),
                    Err(e) => {
                        let _ = tx.send(RefreshMessage::RefreshError(format!(
                            "top videos for {}: {}",
                            channel_id, e
                        )));
                    }
                }
            }
            let _ = tx.send(RefreshMessage::TopLoaded(assemble_top_row(all, top_order)));
        };

        let latest = async {
            let mut all = Vec::new();
            for channel_id in &channels {
                match client.fetch_latest(channel_id).await {
                    Ok(items) => all.extend(items),
                    Err(e) => {
                        let _ = tx.send(RefreshMessage::RefreshError(format!(
                            "latest videos for {}: {}",
                            channel_id, e
                        )));
                    }
                }
            }
            let _ = tx.send(RefreshMessage::LatestLoaded(assemble_latest_row(all)));
        };

        let playlists = async {
            let mut all = Vec::new();
            for channel_id in &channels {
                match client.fetch_playlists(channel_id).await {
                    Ok(items) => all.extend(items),
                    Err(e) => {
                        let _ = tx.send(RefreshMessage::RefreshError(format!(
                            "playlists for {}: {}",
                            channel_id, e
                        )));
                    }
                }
            }
            let _ = tx.send(RefreshMessage::PlaylistsLoaded(assemble_playlists(all)));
        };

        let sections: Vec<Pin<Box<dyn Future<Output = ()> + Send>>> =
            vec![Box::pin(top), Box::pin(latest), Box::pin(playlists)];
        join_all(sections).await;

        let _ = tx.send(RefreshMessage::RefreshCompleted);
    });
}
