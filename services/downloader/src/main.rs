//! IMS forecast feed downloader.
//!
//! Fetches the cities and country feeds once, converts them from ISO-8859-8
//! to UTF-8 and stores a current and a dated archive copy of each. A run
//! where only one feed succeeds is reported as partial success and still
//! exits 0. Logs go to stdout and to `logs/forecast_automation.log`.

mod config;
mod download;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use forecast_common::{logging, time, ProjectDirs};
use tracing::info;

use config::{DownloaderConfig, FeedSources};
use download::{FeedDownloader, RunStatus};

#[derive(Parser, Debug)]
#[command(name = "forecast-downloader")]
#[command(about = "Download the IMS forecast feeds and store UTF-8 copies")]
struct Args {
    /// Project directory holding the current feeds, archive/ and output/
    #[arg(long, env = "FORECAST_ROOT", default_value = ".")]
    root: PathBuf,

    /// Log what would be written without touching the filesystem
    #[arg(long)]
    dry_run: bool,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Cities feed URL (defaults to the IMS feed)
    #[arg(long, env = "IMS_CITIES_URL")]
    cities_url: Option<String>,

    /// Country feed URL (defaults to the IMS feed)
    #[arg(long, env = "IMS_COUNTRY_URL")]
    country_url: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn into_config(self) -> DownloaderConfig {
        DownloaderConfig {
            dirs: ProjectDirs::new(self.root),
            sources: FeedSources::with_overrides(self.cities_url, self.country_url),
            request_timeout: Duration::from_secs(self.timeout_secs),
            dry_run: self.dry_run,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = logging::parse_level(&args.log_level);
    let config = args.into_config();

    // A dry run leaves the filesystem alone, log file included
    let log_file = if config.dry_run {
        None
    } else {
        Some(logging::open_log_file(&config.dirs).context("Failed to open log file")?)
    };
    tracing::subscriber::set_global_default(logging::build_subscriber(level, log_file))?;

    let date = time::today();
    info!(
        root = %config.dirs.root().display(),
        %date,
        dry_run = config.dry_run,
        "Starting forecast download"
    );

    let downloader = FeedDownloader::new(config.dirs.clone(), config.request_timeout)?;
    if !config.dry_run {
        downloader
            .dirs()
            .ensure()
            .context("Failed to create project directories")?;
    }

    let summary = download::run(&downloader, &config.sources, date, config.dry_run).await;

    for (kind, outcome) in &summary.outcomes {
        match outcome {
            Ok(o) => info!(
                %kind,
                current = %o.current.display(),
                archive = %o.archive.display(),
                bytes = o.bytes,
                written = o.written,
                "Feed stored"
            ),
            Err(e) => info!(%kind, error = %e, "Feed not stored"),
        }
    }

    let status = summary.status();
    if status.exit_code() != 0 {
        bail!("No feeds could be downloaded");
    }
    if status == RunStatus::Partial {
        info!(succeeded = summary.succeeded(), "Download finished with missing feeds");
    }
    Ok(())
}
