use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::formatter::{TrackQuery, format_track};
use crate::music_api::SourceApi;

const PAGE_SIZE: u32 = 100;

/// Reads a source playlist into search queries, one per usable track.
pub struct PlaylistReader<'a> {
    source: &'a dyn SourceApi,
    page_size: u32,
}

impl<'a> PlaylistReader<'a> {
    pub fn new(source: &'a dyn SourceApi) -> Self {
        Self {
            source,
            page_size: PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Fetch every page of the playlist and format its tracks in playlist
    /// order. Malformed entries are logged and left out.
    pub async fn fetch_tracks(&self, playlist_id: &str) -> Result<Vec<TrackQuery>> {
        let retrieval_failed = |e: AppError| AppError::PlaylistRetrieval {
            playlist_id: playlist_id.to_string(),
            reason: e.to_string(),
        };

        let name = self
            .source
            .playlist_name(playlist_id)
            .await
            .map_err(retrieval_failed)?;

        info!("Retrieving songs from Spotify playlist titled {}", name);

        let mut items = Vec::new();
        let mut offset = 0;

        loop {
            let page = self
                .source
                .playlist_items(playlist_id, offset, self.page_size)
                .await
                .map_err(retrieval_failed)?;

            items.extend(page.items);

            if page.next.is_none() {
                break;
            }
            offset += self.page_size;
        }

        let mut tracks = Vec::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            match format_track(item.as_ref()) {
                Ok(query) => {
                    debug!("Track {}: {}", position + 1, query);
                    tracks.push(query);
                }
                Err(e) => {
                    warn!(
                        "Skipping entry {} of playlist {}: {}",
                        position + 1,
                        name,
                        e
                    );
                }
            }
        }

        info!(
            "Fetched {} tracks from playlist {} ({} entries)",
            tracks.len(),
            name,
            items.len()
        );

        Ok(tracks)
    }
}
