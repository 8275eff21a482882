pub mod auth;
pub mod client;
pub mod models;
pub mod parser;

pub use auth::{OAuthCredentials, OAuthToken};
pub use client::YtMusicClient;
pub use models::{LibraryPlaylist, SearchCategory, SearchHit};
