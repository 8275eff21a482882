use thiserror::Error;
use tracing::{debug, warn};

use crate::formatter::TrackQuery;
use crate::music_api::DestinationApi;
use crate::ytmusic::{SearchCategory, SearchHit};

pub const DEFAULT_INSERT_ATTEMPTS: u32 = 3;

/// Why a track did not make it into the destination playlist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    #[error("Could not find the song {0} on YouTube Music")]
    NotFound(TrackQuery),

    #[error("Could not add the song {query} to the YouTube Music playlist {playlist_id}")]
    NotAdded {
        query: TrackQuery,
        playlist_id: String,
    },
}

/// Searches the destination catalog for a track and appends the best hit to
/// a playlist.
pub struct TrackInserter<'a> {
    destination: &'a dyn DestinationApi,
    max_attempts: u32,
}

impl<'a> TrackInserter<'a> {
    pub fn new(destination: &'a dyn DestinationApi, max_attempts: u32) -> Self {
        Self {
            destination,
            max_attempts: max_attempts.max(1),
        }
    }

    pub async fn add_track(&self, query: &TrackQuery, playlist_id: &str) -> Result<(), TrackError> {
        let hit = self
            .find_track(query)
            .await
            .ok_or_else(|| TrackError::NotFound(query.clone()))?;

        for attempt in 1..=self.max_attempts {
            match self
                .destination
                .add_playlist_item(playlist_id, &hit.video_id)
                .await
            {
                Ok(()) => {
                    debug!("Added {} ({}) on attempt {}", query, hit.video_id, attempt);
                    return Ok(());
                }
                Err(e) => {
                    warn!(
                        "Attempt {}/{} to add {} failed: {}",
                        attempt, self.max_attempts, query, e
                    );
                }
            }
        }

        Err(TrackError::NotAdded {
            query: query.clone(),
            playlist_id: playlist_id.to_string(),
        })
    }

    /// Top song hit, falling back to the top video hit.
    async fn find_track(&self, query: &TrackQuery) -> Option<SearchHit> {
        for category in [SearchCategory::Songs, SearchCategory::Videos] {
            if let Some(hit) = self.search(query, category).await.into_iter().next() {
                debug!("Found {} in {}: {}", query, category, hit.title);
                return Some(hit);
            }
        }

        debug!("No match found for track: {}", query);
        None
    }

    async fn search(&self, query: &TrackQuery, category: SearchCategory) -> Vec<SearchHit> {
        match self.destination.search(query.as_str(), category).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("YouTube Music {} search for {} failed: {}", category, query, e);
                Vec::new()
            }
        }
    }
}
