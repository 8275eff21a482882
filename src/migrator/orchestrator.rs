use colored::Colorize;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{MigrationOptions, PlaylistPair, pair_playlists};
use crate::error::Result;
use crate::migrator::inserter::{TrackError, TrackInserter};
use crate::migrator::reader::PlaylistReader;
use crate::migrator::report::MigrationReport;
use crate::migrator::resolver::PlaylistResolver;
use crate::music_api::{DestinationApi, SourceApi};

pub struct PlaylistMigrator<'a> {
    source: &'a dyn SourceApi,
    destination: &'a dyn DestinationApi,
    options: MigrationOptions,
}

impl<'a> PlaylistMigrator<'a> {
    pub fn new(
        source: &'a dyn SourceApi,
        destination: &'a dyn DestinationApi,
        options: MigrationOptions,
    ) -> Self {
        Self {
            source,
            destination,
            options,
        }
    }

    /// Migrate each source playlist into the destination title at the same
    /// position. Fails without touching either service when the lists differ
    /// in length.
    pub async fn migrate(
        &self,
        spotify_playlists: &[String],
        youtube_titles: &[String],
    ) -> Result<MigrationReport> {
        let pairs = pair_playlists(spotify_playlists, youtube_titles)?;
        self.migrate_pairs(&pairs).await
    }

    pub async fn migrate_pairs(&self, pairs: &[PlaylistPair]) -> Result<MigrationReport> {
        info!("Starting migration of {} playlists", pairs.len());

        let reader = PlaylistReader::new(self.source);
        let mut resolver = PlaylistResolver::new(self.destination).await?;
        let inserter = TrackInserter::new(self.destination, self.options.insert_attempts);
        let mut report = MigrationReport::new();

        for pair in pairs {
            self.migrate_pair(pair, &reader, &mut resolver, &inserter, &mut report)
                .await;
        }

        info!(
            "Migration finished: {} added, {} not found, {} not added",
            report.added,
            report.not_found.len(),
            report.not_added.len()
        );

        Ok(report)
    }

    async fn migrate_pair(
        &self,
        pair: &PlaylistPair,
        reader: &PlaylistReader<'_>,
        resolver: &mut PlaylistResolver<'_>,
        inserter: &TrackInserter<'_>,
        report: &mut MigrationReport,
    ) {
        let tracks = match reader.fetch_tracks(&pair.source_playlist_id).await {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!("{}", e);
                println!(
                    "{} Error retrieving playlist {} {}",
                    "==>".blue(),
                    pair.source_playlist_id,
                    "✘".red()
                );
                report.skip_playlist(&pair.source_playlist_id);
                return;
            }
        };

        println!(
            "{} Retrieved {} Spotify playlist tracks {}",
            "==>".blue(),
            tracks.len(),
            "✔".green()
        );

        let playlist_id = match resolver.resolve(&pair.destination_title).await {
            Ok(id) => id,
            Err(e) => {
                warn!(
                    "Failed to resolve YouTube Music playlist {}: {}",
                    pair.destination_title, e
                );
                println!(
                    "{} Could not create YouTube Music playlist {} {}",
                    "==>".blue(),
                    pair.destination_title,
                    "✘".red()
                );
                report.skip_playlist(&pair.source_playlist_id);
                return;
            }
        };

        println!(
            "{} Adding tracks to YouTube Music playlist {}",
            "==>".blue(),
            pair.destination_title
        );

        for track in &tracks {
            if self.options.track_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.options.track_delay_ms)).await;
            }

            let outcome = inserter.add_track(track, &playlist_id).await;
            match &outcome {
                Ok(()) => println!("{} Added {} {}", "+".green(), track, "✔".green()),
                Err(TrackError::NotFound(_)) => println!(
                    "{} Couldn't find {} on YouTube Music {}",
                    "+".yellow(),
                    track,
                    "✘".red()
                ),
                Err(TrackError::NotAdded { .. }) => println!(
                    "{} {} could not be added {}",
                    "+".yellow(),
                    track,
                    "✘".red()
                ),
            }
            report.record(&pair.destination_title, outcome);
        }

        println!(
            "{} Migrated Spotify playlist {} {}",
            "==>".blue(),
            pair.source_playlist_id,
            "✔".green()
        );
    }
}
