use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use spotify2ytmusic::ytmusic::{OAuthCredentials, auth};
use spotify2ytmusic::{Config, PlaylistMigrator, SpotifyClient, YtMusicClient};

#[derive(Parser)]
#[command(name = "spotify2ytmusic")]
#[command(about = "Migrate Spotify playlists to YouTube Music")]
#[command(version)]
struct Cli {
    /// Authenticate with YouTube Music and write the OAuth token file
    #[arg(short, long)]
    authenticate: bool,

    /// Location of the OAuth token file written by --authenticate
    #[arg(short, long, default_value = "oauth.json")]
    oauth_file: PathBuf,

    /// Location of the YAML playlist config
    #[arg(short, long, required_unless_present = "authenticate")]
    config: Option<PathBuf>,

    /// Google OAuth client ID (or set YTMUSIC_CLIENT_ID env var)
    #[arg(long, env = "YTMUSIC_CLIENT_ID")]
    client_id: Option<String>,

    /// Google OAuth client secret (or set YTMUSIC_CLIENT_SECRET env var)
    #[arg(long, env = "YTMUSIC_CLIENT_SECRET")]
    client_secret: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn oauth_credentials(&self) -> Option<OAuthCredentials> {
        match (&self.client_id, &self.client_secret) {
            (Some(client_id), Some(client_secret)) => Some(OAuthCredentials {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            }),
            _ => None,
        }
    }
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    if cli.authenticate {
        return authenticate(&cli).await;
    }

    // clap enforces --config unless --authenticate
    let config_path = cli.config.as_deref().context("--config is required")?;
    migrate(config_path, &cli).await
}

async fn authenticate(cli: &Cli) -> Result<()> {
    let credentials = cli.oauth_credentials().context(
        "--client-id and --client-secret (or YTMUSIC_CLIENT_ID / YTMUSIC_CLIENT_SECRET) are required to authenticate",
    )?;

    let http_client = YtMusicClient::http_client()?;
    let token = auth::authenticate(&http_client, &credentials)
        .await
        .context("YouTube Music authentication failed")?;

    token
        .save(&cli.oauth_file)
        .context("Failed to write OAuth file")?;

    println!(
        "\n{} Credentials saved to {}",
        "✔".green(),
        cli.oauth_file.display()
    );

    Ok(())
}

async fn migrate(config_path: &Path, cli: &Cli) -> Result<()> {
    println!("{}", "Spotify to YouTube Music Playlist Migrator".cyan().bold());
    println!("{}", "=".repeat(50));

    let config = Config::from_file(config_path).context("Failed to load configuration")?;

    // Checked before any client connects
    config.playlist_pairs()?;

    let missing = config.get_missing_config();
    if !missing.is_empty() {
        println!("{}", "Missing configuration:".red());
        for item in &missing {
            println!("   - {}", item);
        }
        std::process::exit(1);
    }

    let spotify_client = SpotifyClient::new(&config.spotify)
        .await
        .context("Failed to connect to Spotify")?;

    let ytmusic_client = YtMusicClient::new(&cli.oauth_file, cli.oauth_credentials())
        .await
        .context("Failed to connect to YouTube Music")?;

    let migrator = PlaylistMigrator::new(
        &spotify_client,
        &ytmusic_client,
        config.migration.clone(),
    );

    let report = migrator
        .migrate(&config.spotify.playlists, &config.youtube.playlists)
        .await
        .context("Migration failed")?;

    report.print();

    println!("\n{}", "Migration completed!".green());

    Ok(())
}
