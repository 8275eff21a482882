pub mod config;
pub mod error;
pub mod formatter;
pub mod migrator;
pub mod music_api;
pub mod spotify;
pub mod ytmusic;

pub use config::{Config, MigrationOptions, PlaylistPair};
pub use error::{AppError, Result};
pub use formatter::{MalformedTrack, TrackQuery, format_track};
pub use migrator::{MigrationReport, PlaylistMigrator, TrackError};
pub use music_api::{DestinationApi, SourceApi};
pub use spotify::{SourceItem, SourcePage, SourceTrack, SpotifyClient};
pub use ytmusic::{LibraryPlaylist, SearchCategory, SearchHit, YtMusicClient};
