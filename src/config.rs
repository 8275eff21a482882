use serde::Deserialize;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::migrator::inserter::DEFAULT_INSERT_ATTEMPTS;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub spotify: SpotifyConfig,
    pub youtube: YoutubeConfig,
    #[serde(default)]
    pub migration: MigrationOptions,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpotifyConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub playlists: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct YoutubeConfig {
    #[serde(default)]
    pub playlists: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MigrationOptions {
    /// Insert attempts per track before it is reported as not added
    #[serde(default = "default_insert_attempts")]
    pub insert_attempts: u32,

    /// Pause before each track is searched and inserted
    #[serde(default)]
    pub track_delay_ms: u64,
}

fn default_insert_attempts() -> u32 {
    DEFAULT_INSERT_ATTEMPTS
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            insert_attempts: DEFAULT_INSERT_ATTEMPTS,
            track_delay_ms: 0,
        }
    }
}

/// A Spotify playlist and the YouTube Music playlist title it migrates into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistPair {
    pub source_playlist_id: String,
    pub destination_title: String,
}

/// Pair source playlists with destination titles by position.
pub fn pair_playlists(sources: &[String], titles: &[String]) -> Result<Vec<PlaylistPair>> {
    if sources.len() != titles.len() {
        return Err(AppError::ConfigMismatch {
            spotify: sources.len(),
            youtube: titles.len(),
        });
    }

    Ok(sources
        .iter()
        .zip(titles)
        .map(|(source, title)| PlaylistPair {
            source_playlist_id: source.clone(),
            destination_title: title.clone(),
        })
        .collect())
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;

        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let mut config: Config = serde_yaml::from_str(contents)?;

        if config.spotify.client_id.is_empty() {
            config.spotify.client_id = std::env::var("SPOTIFY_CLIENT_ID").unwrap_or_default();
        }
        if config.spotify.client_secret.is_empty() {
            config.spotify.client_secret =
                std::env::var("SPOTIFY_CLIENT_SECRET").unwrap_or_default();
        }

        if config.migration.insert_attempts == 0 {
            return Err(AppError::Config(
                "migration.insert_attempts must be at least 1".into(),
            ));
        }

        Ok(config)
    }

    pub fn playlist_pairs(&self) -> Result<Vec<PlaylistPair>> {
        pair_playlists(&self.spotify.playlists, &self.youtube.playlists)
    }

    pub fn get_missing_config(&self) -> Vec<String> {
        let mut missing = Vec::new();

        if self.spotify.client_id.is_empty() {
            missing.push("spotify.client_id (or SPOTIFY_CLIENT_ID)".to_string());
        }
        if self.spotify.client_secret.is_empty() {
            missing.push("spotify.client_secret (or SPOTIFY_CLIENT_SECRET)".to_string());
        }

        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
spotify:
  client_id: abc
  client_secret: def
  playlists:
    - 37i9dQZF1DXcBWIGoYBM5M
    - 37i9dQZF1DX0XUsuxWHRQd
youtube:
  playlists:
    - Today's Hits
    - Rap Caviar
"#;

    #[test]
    fn test_parse_sample_config() {
        let config = Config::from_yaml(SAMPLE).unwrap();

        assert_eq!(config.spotify.client_id, "abc");
        assert_eq!(config.spotify.client_secret, "def");
        assert_eq!(config.spotify.playlists.len(), 2);
        assert_eq!(config.youtube.playlists[1], "Rap Caviar");
        assert_eq!(config.migration.insert_attempts, 3);
        assert_eq!(config.migration.track_delay_ms, 0);
        assert!(config.get_missing_config().is_empty());
    }

    #[test]
    fn test_pairs_are_positional() {
        let config = Config::from_yaml(SAMPLE).unwrap();
        let pairs = config.playlist_pairs().unwrap();

        assert_eq!(
            pairs,
            vec![
                PlaylistPair {
                    source_playlist_id: "37i9dQZF1DXcBWIGoYBM5M".to_string(),
                    destination_title: "Today's Hits".to_string(),
                },
                PlaylistPair {
                    source_playlist_id: "37i9dQZF1DX0XUsuxWHRQd".to_string(),
                    destination_title: "Rap Caviar".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_mismatched_counts_rejected() {
        let sources = vec!["a".to_string(), "b".to_string()];
        let titles = vec!["only one".to_string()];

        match pair_playlists(&sources, &titles) {
            Err(AppError::ConfigMismatch { spotify, youtube }) => {
                assert_eq!(spotify, 2);
                assert_eq!(youtube, 1);
            }
            other => panic!("expected ConfigMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_migration_options_override() {
        let yaml = r#"
spotify:
  client_id: abc
  client_secret: def
  playlists: []
youtube:
  playlists: []
migration:
  insert_attempts: 5
  track_delay_ms: 1000
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.migration.insert_attempts, 5);
        assert_eq!(config.migration.track_delay_ms, 1000);
    }

    #[test]
    fn test_zero_insert_attempts_rejected() {
        let yaml = r#"
spotify:
  client_id: abc
  client_secret: def
youtube:
  playlists: []
migration:
  insert_attempts: 0
"#;
        assert!(matches!(Config::from_yaml(yaml), Err(AppError::Config(_))));
    }

    #[test]
    fn test_missing_youtube_section_is_an_error() {
        let yaml = "spotify:\n  playlists: [a]\n";
        assert!(matches!(Config::from_yaml(yaml), Err(AppError::Yaml(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.youtube.playlists[0], "Today's Hits");

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            Config::from_file(&missing),
            Err(AppError::Config(_))
        ));
    }
}
