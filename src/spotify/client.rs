use async_trait::async_trait;
use rspotify::{
    ClientCredsSpotify, Credentials,
    model::{PlayableItem, PlaylistId, PlaylistItem},
    prelude::*,
};
use tracing::{debug, info};
use url::Url;

use crate::config::SpotifyConfig;
use crate::error::{AppError, Result};
use crate::music_api::SourceApi;
use crate::spotify::models::{SourceItem, SourcePage, SourceTrack};

/// Client for reading Spotify playlists using client credentials.
/// Does not require user authentication - only app credentials, so private
/// playlists are out of reach.
pub struct SpotifyClient {
    client: ClientCredsSpotify,
}

impl SpotifyClient {
    pub async fn new(config: &SpotifyConfig) -> Result<Self> {
        let creds = Credentials::new(&config.client_id, &config.client_secret);
        let client = ClientCredsSpotify::new(creds);

        client.request_token().await?;
        info!("Authenticated with Spotify using client credentials");

        Ok(Self { client })
    }

    /// Extract the playlist ID from a configured playlist reference.
    /// Supports formats:
    /// - 37i9dQZF1E8NC99vGqLsaH
    /// - https://open.spotify.com/playlist/37i9dQZF1E8NC99vGqLsaH
    /// - https://open.spotify.com/playlist/37i9dQZF1E8NC99vGqLsaH?si=...
    /// - spotify:playlist:37i9dQZF1E8NC99vGqLsaH
    pub fn parse_playlist_url(playlist_ref: &str) -> Result<String> {
        let playlist_ref = playlist_ref.trim();

        if let Some(id) = playlist_ref.strip_prefix("spotify:playlist:") {
            return Ok(id.to_string());
        }

        // Anything that doesn't parse as an absolute URL is taken as a bare ID
        let Ok(url) = Url::parse(playlist_ref) else {
            return Ok(playlist_ref.to_string());
        };

        let path_segments: Vec<&str> = url
            .path_segments()
            .ok_or_else(|| AppError::Config(format!("Invalid Spotify URL: {}", playlist_ref)))?
            .collect();

        // Expect /playlist/{id}
        if path_segments.len() >= 2 && path_segments[0] == "playlist" {
            Ok(path_segments[1].to_string())
        } else {
            Err(AppError::Config(format!(
                "URL does not appear to be a Spotify playlist URL: {}",
                playlist_ref
            )))
        }
    }

    fn playlist_id(playlist_ref: &str) -> Result<PlaylistId<'static>> {
        let id = Self::parse_playlist_url(playlist_ref)?;
        PlaylistId::from_id(id)
            .map_err(|e| AppError::Config(format!("Invalid playlist ID {}: {}", playlist_ref, e)))
    }
}

fn to_source_item(item: PlaylistItem) -> SourceItem {
    let track = match item.track {
        Some(PlayableItem::Track(track)) => Some(SourceTrack {
            name: Some(track.name),
            artists: Some(track.artists.into_iter().map(|a| a.name).collect()),
        }),
        Some(_) => {
            debug!("Skipping non-track playlist item");
            None
        }
        None => None,
    };

    SourceItem { track }
}

#[async_trait]
impl SourceApi for SpotifyClient {
    async fn playlist_name(&self, playlist_id: &str) -> Result<String> {
        let id = Self::playlist_id(playlist_id)?;
        let playlist = self.client.playlist(id, None, None).await?;
        Ok(playlist.name)
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<SourcePage> {
        let id = Self::playlist_id(playlist_id)?;

        let page = self
            .client
            .playlist_items_manual(id, None, None, Some(limit), Some(offset))
            .await?;

        debug!(
            "Fetched {} items from playlist {} at offset {}",
            page.items.len(),
            playlist_id,
            offset
        );

        Ok(SourcePage {
            items: page.items.into_iter().map(|i| Some(to_source_item(i))).collect(),
            next: page.next,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_id() {
        assert_eq!(
            SpotifyClient::parse_playlist_url("37i9dQZF1E8NC99vGqLsaH").unwrap(),
            "37i9dQZF1E8NC99vGqLsaH"
        );
    }

    #[test]
    fn test_parse_uri() {
        assert_eq!(
            SpotifyClient::parse_playlist_url("spotify:playlist:37i9dQZF1E8NC99vGqLsaH").unwrap(),
            "37i9dQZF1E8NC99vGqLsaH"
        );
    }

    #[test]
    fn test_parse_url_with_query() {
        assert_eq!(
            SpotifyClient::parse_playlist_url(
                "https://open.spotify.com/playlist/37i9dQZF1E8NC99vGqLsaH?si=abc123"
            )
            .unwrap(),
            "37i9dQZF1E8NC99vGqLsaH"
        );
    }

    #[test]
    fn test_parse_non_playlist_url() {
        assert!(
            SpotifyClient::parse_playlist_url("https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3")
                .is_err()
        );
    }
}
