use colored::Colorize;

use crate::formatter::TrackQuery;
use crate::migrator::inserter::TrackError;

/// A track that was found but could not be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotAddedTrack {
    pub playlist_title: String,
    pub query: TrackQuery,
}

/// Outcome of a whole run. Every processed track is counted in exactly one
/// of `added`, `not_found` or `not_added`.
#[derive(Debug, Clone, Default)]
pub struct MigrationReport {
    pub added: usize,
    pub not_found: Vec<TrackQuery>,
    pub not_added: Vec<NotAddedTrack>,
    pub skipped_playlists: Vec<String>,
}

impl MigrationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, playlist_title: &str, outcome: Result<(), TrackError>) {
        match outcome {
            Ok(()) => self.added += 1,
            Err(TrackError::NotFound(query)) => self.not_found.push(query),
            Err(TrackError::NotAdded { query, .. }) => self.not_added.push(NotAddedTrack {
                playlist_title: playlist_title.to_string(),
                query,
            }),
        }
    }

    pub fn skip_playlist(&mut self, playlist_id: &str) {
        self.skipped_playlists.push(playlist_id.to_string());
    }

    pub fn total_tracks(&self) -> usize {
        self.added + self.not_found.len() + self.not_added.len()
    }

    pub fn print(&self) {
        if !self.not_found.is_empty() {
            println!();
            println!(
                "{}",
                "The following song(s) could not be found on YouTube Music".yellow()
            );
            for query in &self.not_found {
                println!("{}", query);
            }
        }

        if !self.not_added.is_empty() {
            println!();
            println!(
                "{}",
                "The following song(s) couldn't be added to their YouTube Music playlist(s)"
                    .yellow()
            );
            for track in &self.not_added {
                println!("Playlist: {} | Song: {}", track.playlist_title, track.query);
            }
        }

        println!();
        println!("{}", "=".repeat(60));
        println!("{}", "MIGRATION SUMMARY".bold());
        println!("{}", "=".repeat(60));
        println!("Total tracks processed: {}", self.total_tracks());
        println!("Added: {}", self.added.to_string().green());
        println!("Not found: {}", self.not_found.len().to_string().red());
        println!("Not added: {}", self.not_added.len().to_string().red());
        if !self.skipped_playlists.is_empty() {
            println!(
                "Skipped playlists: {}",
                self.skipped_playlists.join(", ").red()
            );
        }
        println!("{}", "=".repeat(60));
    }
}
