//! Daily forecast story generator.
//!
//! Reads the feeds saved by `forecast-downloader` from the project root and
//! writes the story image (PNG or JPEG by extension).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use forecast_common::{logging, time, ProjectDirs};
use renderer::LayoutConfig;
use story_generator::{load_forecast_day, save_image, AssetPaths, StoryRenderer};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "story-generator")]
#[command(about = "Render the daily IMS forecast story image")]
struct Args {
    /// Forecast date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<String>,

    /// Output file (.png, .jpg or .jpeg), defaults to output/forecast_map_<date>.png
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Project directory holding the downloaded feeds
    #[arg(long, env = "FORECAST_ROOT", default_value = ".")]
    root: PathBuf,

    /// Asset directory, defaults to <root>/assets
    #[arg(long, env = "FORECAST_ASSETS_DIR")]
    assets_dir: Option<PathBuf>,

    /// Font directory, defaults to <root>/fonts
    #[arg(long, env = "FORECAST_FONTS_DIR")]
    fonts_dir: Option<PathBuf>,

    /// YAML file overriding parts of the default layout
    #[arg(long, env = "FORECAST_LAYOUT")]
    layout: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let dirs = ProjectDirs::new(&args.root);
    let log_file = logging::open_log_file(&dirs).context("Failed to open log file")?;
    tracing::subscriber::set_global_default(logging::build_subscriber(
        logging::parse_level(&args.log_level),
        Some(log_file),
    ))?;

    let date = match &args.date {
        Some(s) => time::parse_date(s)?,
        None => time::today(),
    };
    info!(root = %dirs.root().display(), %date, "Starting story generation");

    let layout = match &args.layout {
        Some(path) => LayoutConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load layout {}", path.display()))?,
        None => LayoutConfig::default(),
    };

    let assets_dir = args.assets_dir.unwrap_or_else(|| dirs.root().join("assets"));
    let fonts_dir = args.fonts_dir.unwrap_or_else(|| dirs.root().join("fonts"));
    let assets = AssetPaths::from_root(&assets_dir, &fonts_dir);

    let day = load_forecast_day(&dirs, date).context("Failed to extract forecast data")?;

    let renderer = StoryRenderer::new(layout, assets);
    let (image, report) = renderer
        .render_with_report(&day)
        .context("Failed to render story")?;
    report.log_summary();

    let output = args
        .output
        .unwrap_or_else(|| dirs.default_output_path(date));
    save_image(&image, &output)
        .with_context(|| format!("Failed to save {}", output.display()))?;

    info!(path = %output.display(), "Story generated");
    Ok(())
}
