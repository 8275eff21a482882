pub mod inserter;
pub mod orchestrator;
pub mod reader;
pub mod report;
pub mod resolver;

pub use inserter::{TrackError, TrackInserter};
pub use orchestrator::PlaylistMigrator;
pub use reader::PlaylistReader;
pub use report::{MigrationReport, NotAddedTrack};
pub use resolver::PlaylistResolver;
