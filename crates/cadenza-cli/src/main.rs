// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cadenza_catalog::{
    artwork_size, artwork_url, format_artwork_url, songs_from_collection, CatalogClient,
    Collection, StaticStorefront,
};
use cadenza_config::{load as load_config, AppConfig};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "cadenza")]
#[command(version, about = "Query the Cadenza music catalog backend", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storefront (region) for region-scoped endpoints; overrides the configuration
    #[arg(long, global = true)]
    storefront: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fill the {w}/{h} placeholders of an artwork URL template
    ArtworkUrl {
        template: String,
        width: u32,
        height: u32,
    },
    /// Artwork edge length for a screen-size label (xl, lg, md, sm)
    ArtworkSize { screen_size: String },
    /// Rewrite the last path segment of an artwork URL to {width}x{height}bb.jpg
    FormatArtworkUrl { url: String, width: u32, height: u32 },
    /// List the tracks embedded in a collection JSON file ("-" for stdin)
    Songs { file: PathBuf },
    /// Artist artwork resolved from an iTunes artist page
    ArtistArtwork {
        url: String,
        artist_id: String,
        size: String,
    },
    /// Artist details scraped from an iTunes artist page
    ArtistDetails {
        url: String,
        artist_id: String,
        size: String,
    },
    /// Banner artwork for a curator page
    CuratorBanner {
        url: String,
        curator_id: String,
        size: String,
    },
    /// Curators publishing in a genre
    CuratorsByGenre { genre_id: String },
    /// Extra metadata scraped from an iTunes album page
    AlbumExtraInfo { url: String },
    /// Grammy results for the current storefront
    GrammyResults,
    /// All featured playlists for the current storefront
    FeaturedPlaylists,
    /// Main featured playlists for the current storefront
    MainFeaturedPlaylists,
    /// Genre details with up to --limit items
    Genre {
        id: String,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// A single named sub-resource of a genre, e.g. playlists
    GenreResource { id: String, resource: String },
    /// Browse playlists under a path suffix, e.g. charts/top
    Browse { path: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.telemetry.log_level);
    log_config(&config, cli.config.as_deref());

    let output = run(cli.command, &config, cli.storefront).await?;
    println!("{}", render(&output)?);

    Ok(())
}

fn init_tracing(default_level: &str) {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

// Config is loaded before the subscriber exists, so it is reported from here.
fn log_config(config: &AppConfig, config_path: Option<&Path>) {
    info!(
        target: "config",
        path = ?config_path,
        base_url = %config.catalog.base_url,
        storefront = %config.catalog.storefront,
        timeout_secs = config.catalog.timeout_secs,
        "configuration loaded"
    );
}

async fn run(command: Commands, config: &AppConfig, storefront: Option<String>) -> Result<Value> {
    let client = || build_client(config, storefront.clone());

    let output = match command {
        Commands::ArtworkUrl {
            template,
            width,
            height,
        } => Value::String(artwork_url(&template, width, height)),
        Commands::ArtworkSize { screen_size } => Value::from(artwork_size(&screen_size)),
        Commands::FormatArtworkUrl { url, width, height } => {
            Value::String(format_artwork_url(&url, width, height))
        }
        Commands::Songs { file } => {
            let collection = read_collection(&file)?;
            let songs = songs_from_collection(collection.as_ref());
            debug!(target: "cli", count = songs.len(), "songs extracted");
            serde_json::to_value(songs)?
        }
        Commands::ArtistArtwork {
            url,
            artist_id,
            size,
        } => client()?.artist_artwork(&url, &artist_id, &size).await?,
        Commands::ArtistDetails {
            url,
            artist_id,
            size,
        } => client()?.artist_details(&url, &artist_id, &size).await?,
        Commands::CuratorBanner {
            url,
            curator_id,
            size,
        } => client()?.curator_banner(&url, &curator_id, &size).await?,
        Commands::CuratorsByGenre { genre_id } => client()?.curators_by_genre(&genre_id).await?,
        Commands::AlbumExtraInfo { url } => client()?.album_extra_info(&url).await?,
        Commands::GrammyResults => client()?.grammy_results().await?,
        Commands::FeaturedPlaylists => client()?.featured_playlists().await?,
        Commands::MainFeaturedPlaylists => client()?.main_featured_playlists().await?,
        Commands::Genre { id, limit } => client()?.genre_data(&id, limit).await?,
        Commands::GenreResource { id, resource } => {
            client()?.genre_resource(&id, &resource).await?
        }
        Commands::Browse { path } => client()?.browse_playlists(&path).await?,
    };

    Ok(output)
}

fn build_client(config: &AppConfig, storefront: Option<String>) -> Result<CatalogClient> {
    let storefront = storefront.unwrap_or_else(|| config.catalog.storefront.clone());
    let client = CatalogClient::builder()
        .base_url(config.catalog.base_url.as_str())
        .timeout(config.catalog.timeout())
        .storefront(StaticStorefront::new(storefront))
        .build()
        .with_context(|| format!("building catalog client for {}", config.catalog.base_url))?;
    Ok(client)
}

/// `None` when the file holds JSON `null`.
fn read_collection(file: &Path) -> Result<Option<Collection>> {
    let raw = if file.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin())?
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("reading collection from {}", file.display()))?
    };
    Ok(serde_json::from_str(&raw)?)
}

/// Strings are printed bare so URLs can be piped; everything else as pretty JSON.
fn render(output: &Value) -> Result<String> {
    match output {
        Value::String(text) => Ok(text.clone()),
        other => Ok(serde_json::to_string_pretty(other)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_genre_with_limit() {
        let cli = Cli::try_parse_from(["cadenza", "--storefront", "gb", "genre", "20", "--limit", "5"])
            .unwrap();
        assert_eq!(cli.storefront.as_deref(), Some("gb"));
        match cli.command {
            Commands::Genre { id, limit } => {
                assert_eq!(id, "20");
                assert_eq!(limit, 5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_build_client_prefers_cli_storefront() {
        let config = AppConfig::default();

        let client = build_client(&config, Some("jp".to_string())).unwrap();
        assert_eq!(client.storefront(), "jp");

        let client = build_client(&config, None).unwrap();
        assert_eq!(client.storefront(), config.catalog.storefront);
    }

    #[test]
    fn test_build_client_rejects_bad_base_url() {
        let mut config = AppConfig::default();
        config.catalog.base_url = "::not-a-url".to_string();
        assert!(build_client(&config, None).is_err());
    }

    #[tokio::test]
    async fn test_run_offline_commands() {
        let config = AppConfig::default();

        let output = run(
            Commands::ArtworkUrl {
                template: "http://x/{w}x{h}bb.jpg".to_string(),
                width: 300,
                height: 300,
            },
            &config,
            None,
        )
        .await
        .unwrap();
        assert_eq!(render(&output).unwrap(), "http://x/300x300bb.jpg");

        let output = run(
            Commands::ArtworkSize {
                screen_size: "md".to_string(),
            },
            &config,
            None,
        )
        .await
        .unwrap();
        assert_eq!(render(&output).unwrap(), "240");
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_log_config_emits_loaded_configuration() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let config = AppConfig::default();
        tracing::subscriber::with_default(subscriber, || {
            log_config(&config, Some(Path::new("cadenza.toml")));
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("configuration loaded"));
        assert!(output.contains("cadenza.toml"));
        assert!(output.contains("storefront=us"));
    }

    #[test]
    fn test_render_pretty_prints_objects() {
        let rendered = render(&serde_json::json!({ "id": "20" })).unwrap();
        assert_eq!(rendered, "{\n  \"id\": \"20\"\n}");
    }
}
