//! Tracing setup shared by the downloader and the story generator.
//!
//! Events go to stdout as JSON and, unless disabled, are appended as plain
//! text to `logs/forecast_automation.log` under the project root.

use std::fs::{File, OpenOptions};
use std::sync::Mutex;

use tracing::{Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::error::ForecastResult;
use crate::paths::ProjectDirs;

pub const LOG_FILE_NAME: &str = "forecast_automation.log";

/// Unknown names fall back to INFO.
pub fn parse_level(name: &str) -> Level {
    match name.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Open the shared log file for appending, creating `logs/` if needed.
pub fn open_log_file(dirs: &ProjectDirs) -> ForecastResult<File> {
    std::fs::create_dir_all(dirs.logs_dir())?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dirs.log_file_path())?;
    Ok(file)
}

pub fn build_subscriber(level: Level, file: Option<File>) -> impl Subscriber + Send + Sync {
    let file_layer = file.map(|f| {
        fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(Mutex::new(f))
    });

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(fmt::layer().with_target(true).json())
        .with(file_layer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, info};

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level(" warn "), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_events_are_appended_to_log_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = ProjectDirs::new(tmp.path());

        let file = open_log_file(&dirs).unwrap();
        let subscriber = build_subscriber(Level::INFO, Some(file));
        tracing::subscriber::with_default(subscriber, || {
            info!(city = "Haifa", "first run");
            debug!("filtered out");
        });

        let file = open_log_file(&dirs).unwrap();
        tracing::subscriber::with_default(build_subscriber(Level::INFO, Some(file)), || {
            info!("second run");
        });

        let contents = std::fs::read_to_string(dirs.log_file_path()).unwrap();
        assert!(contents.contains("first run"));
        assert!(contents.contains("Haifa"));
        assert!(contents.contains("second run"));
        assert!(!contents.contains("filtered out"));
    }

    #[test]
    fn test_no_file_layer_leaves_logs_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = ProjectDirs::new(tmp.path());

        tracing::subscriber::with_default(build_subscriber(Level::INFO, None), || {
            info!("stdout only");
        });

        assert!(!dirs.logs_dir().exists());
    }
}
