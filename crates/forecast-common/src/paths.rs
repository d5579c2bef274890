//! On-disk layout of a forecast project directory.
//!
//! ```text
//! <root>/
//!   isr_cities_utf8.xml      current converted feeds
//!   isr_country_utf8.xml
//!   archive/                 dated feed copies
//!   output/                  generated story images
//!   logs/                    forecast_automation.log
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::ForecastResult;
use crate::feed::FeedKind;
use crate::logging::LOG_FILE_NAME;

#[derive(Debug, Clone)]
pub struct ProjectDirs {
    root: PathBuf,
}

impl ProjectDirs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.root.join("archive")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join("output")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn log_file_path(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILE_NAME)
    }

    pub fn current_feed_path(&self, kind: FeedKind) -> PathBuf {
        self.root.join(kind.current_file_name())
    }

    pub fn archive_path(&self, kind: FeedKind, date: NaiveDate) -> PathBuf {
        self.archive_dir().join(kind.archive_file_name(date))
    }

    pub fn default_output_path(&self, date: NaiveDate) -> PathBuf {
        self.output_dir()
            .join(format!("forecast_map_{}.png", date.format("%Y-%m-%d")))
    }

    /// Create the archive, output and logs directories if missing.
    pub fn ensure(&self) -> ForecastResult<()> {
        for dir in [self.archive_dir(), self.output_dir(), self.logs_dir()] {
            std::fs::create_dir_all(&dir)?;
        }
        Ok(())
    }
}
