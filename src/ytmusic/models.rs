use serde::{Deserialize, Serialize};
use std::fmt;

/// A playlist in the signed-in account's library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryPlaylist {
    pub playlist_id: String,
    pub title: String,
}

/// A catalog search result that can be added to a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub video_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCategory {
    Songs,
    Videos,
}

impl SearchCategory {
    /// InnerTube `params` value restricting search to this category.
    pub fn filter_params(self) -> &'static str {
        match self {
            SearchCategory::Songs => "EgWKAQIIAWoMEA4QChADEAQQCRAF",
            SearchCategory::Videos => "EgWKAQIQAWoMEA4QChADEAQQCRAF",
        }
    }
}

impl fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchCategory::Songs => write!(f, "songs"),
            SearchCategory::Videos => write!(f, "videos"),
        }
    }
}
