use std::fmt;
use thiserror::Error;

use crate::spotify::{SourceItem, SourceTrack};

/// Search query derived from a source track: `Title`, `Title - Artist` or
/// `Title - Artist1, Artist2, ...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackQuery(String);

impl TrackQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A playlist entry that cannot be turned into a query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedTrack {
    #[error("missing track information")]
    MissingTrack,

    #[error("track has no name")]
    MissingName,
}

/// Format a playlist entry as a search query.
pub fn format_track(item: Option<&SourceItem>) -> Result<TrackQuery, MalformedTrack> {
    let track = item
        .and_then(|i| i.track.as_ref())
        .ok_or(MalformedTrack::MissingTrack)?;

    format_source_track(track)
}

fn format_source_track(track: &SourceTrack) -> Result<TrackQuery, MalformedTrack> {
    let name = track
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .ok_or(MalformedTrack::MissingName)?;

    match track.artists.as_deref() {
        None | Some([]) => Ok(TrackQuery::new(name)),
        Some([artist]) => Ok(TrackQuery::new(format!("{} - {}", name, artist))),
        Some(artists) => Ok(TrackQuery::new(format!("{} - {}", name, artists.join(", ")))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: Option<&str>, artists: Option<&[&str]>) -> SourceItem {
        SourceItem {
            track: Some(SourceTrack {
                name: name.map(String::from),
                artists: artists.map(|a| a.iter().map(|s| s.to_string()).collect()),
            }),
        }
    }

    #[test]
    fn test_single_artist() {
        let item = SourceItem::mock("Bohemian Rhapsody", &["Queen"]);
        assert_eq!(
            format_track(Some(&item)).unwrap().as_str(),
            "Bohemian Rhapsody - Queen"
        );
    }

    #[test]
    fn test_multiple_artists_keep_source_order() {
        let item = SourceItem::mock("Under Pressure", &["Queen", "David Bowie", "Annie Lennox"]);
        assert_eq!(
            format_track(Some(&item)).unwrap().as_str(),
            "Under Pressure - Queen, David Bowie, Annie Lennox"
        );
    }

    #[test]
    fn test_missing_artists_uses_title_alone() {
        let item = item(Some("Clair de Lune"), None);
        assert_eq!(format_track(Some(&item)).unwrap().as_str(), "Clair de Lune");
    }

    #[test]
    fn test_empty_artists_uses_title_alone() {
        let item = item(Some("Clair de Lune"), Some(&[]));
        assert_eq!(format_track(Some(&item)).unwrap().as_str(), "Clair de Lune");
    }

    #[test]
    fn test_missing_record_or_body() {
        assert_eq!(format_track(None), Err(MalformedTrack::MissingTrack));

        let empty = SourceItem { track: None };
        assert_eq!(format_track(Some(&empty)), Err(MalformedTrack::MissingTrack));
    }

    #[test]
    fn test_missing_or_blank_name() {
        let unnamed = item(None, Some(&["Queen"]));
        assert_eq!(format_track(Some(&unnamed)), Err(MalformedTrack::MissingName));

        let blank = item(Some("   "), None);
        assert_eq!(format_track(Some(&blank)), Err(MalformedTrack::MissingName));
    }
}
