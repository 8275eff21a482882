use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(
        "The number of Spotify and YouTube Music playlists must match ({spotify} vs {youtube})"
    )]
    ConfigMismatch { spotify: usize, youtube: usize },

    #[error("Error retrieving playlist {playlist_id}: {reason}")]
    PlaylistRetrieval { playlist_id: String, reason: String },

    #[error("Spotify API error: {0}")]
    SpotifyApi(#[from] rspotify::ClientError),

    #[error("YouTube Music API error: {0}")]
    YtMusicApi(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
