//! Seams between the migration workflow and the two streaming services.

use async_trait::async_trait;

use crate::error::Result;
use crate::spotify::SourcePage;
use crate::ytmusic::{LibraryPlaylist, SearchCategory, SearchHit};

/// Read access to the service playlists are migrated from.
#[async_trait]
pub trait SourceApi: Send + Sync {
    /// Display name of a playlist.
    async fn playlist_name(&self, playlist_id: &str) -> Result<String>;

    /// One page of a playlist's items starting at `offset`.
    async fn playlist_items(&self, playlist_id: &str, offset: u32, limit: u32)
    -> Result<SourcePage>;
}

/// Library, search and playlist-edit access to the service playlists are migrated to.
#[async_trait]
pub trait DestinationApi: Send + Sync {
    async fn library_playlists(&self) -> Result<Vec<LibraryPlaylist>>;

    /// Create a playlist and return its id.
    async fn create_playlist(&self, title: &str, description: &str) -> Result<String>;

    /// Ranked search results for `query`, best match first.
    async fn search(&self, query: &str, category: SearchCategory) -> Result<Vec<SearchHit>>;

    async fn add_playlist_item(&self, playlist_id: &str, video_id: &str) -> Result<()>;
}
