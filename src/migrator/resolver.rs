use std::collections::HashMap;
use tracing::info;

use crate::error::Result;
use crate::music_api::DestinationApi;

/// Maps destination playlist titles to ids for the duration of a run,
/// creating playlists that don't exist yet.
pub struct PlaylistResolver<'a> {
    destination: &'a dyn DestinationApi,
    playlists: HashMap<String, String>,
}

impl<'a> PlaylistResolver<'a> {
    /// Index the destination library by title. On duplicate titles the last
    /// listed playlist wins.
    pub async fn new(destination: &'a dyn DestinationApi) -> Result<Self> {
        let playlists = destination
            .library_playlists()
            .await?
            .into_iter()
            .map(|p| (p.title, p.playlist_id))
            .collect();

        Ok(Self {
            destination,
            playlists,
        })
    }

    pub async fn resolve(&mut self, title: &str) -> Result<String> {
        if let Some(playlist_id) = self.playlists.get(title) {
            info!("The YouTube Music playlist {} already exists", title);
            return Ok(playlist_id.clone());
        }

        let playlist_id = self.destination.create_playlist(title, title).await?;
        info!("Created new YouTube Music playlist {}", title);

        self.playlists.insert(title.to_string(), playlist_id.clone());
        Ok(playlist_id)
    }
}
