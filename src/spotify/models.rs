use serde::{Deserialize, Serialize};

/// Track body of a playlist entry. Fields are optional because the Web API
/// returns partial objects for removed, local and region-locked tracks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceTrack {
    pub name: Option<String>,
    pub artists: Option<Vec<String>>,
}

/// One entry of a playlist's item listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceItem {
    pub track: Option<SourceTrack>,
}

/// A page of playlist items. `next` is set while more pages remain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcePage {
    pub items: Vec<Option<SourceItem>>,
    pub next: Option<String>,
}

#[cfg(test)]
impl SourceItem {
    pub fn mock(name: &str, artists: &[&str]) -> Self {
        Self {
            track: Some(SourceTrack {
                name: Some(name.to_string()),
                artists: Some(artists.iter().map(|a| a.to_string()).collect()),
            }),
        }
    }
}
