//! Runtime configuration for the downloader.

use std::time::Duration;

use forecast_common::{FeedKind, ProjectDirs};

/// Where each feed is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSources {
    pub cities: String,
    pub country: String,
}

impl Default for FeedSources {
    fn default() -> Self {
        Self {
            cities: FeedKind::Cities.default_url(),
            country: FeedKind::Country.default_url(),
        }
    }
}

impl FeedSources {
    /// Defaults with any non-empty overrides applied.
    pub fn with_overrides(cities: Option<String>, country: Option<String>) -> Self {
        let defaults = Self::default();
        let pick = |value: Option<String>, default: String| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };
        Self {
            cities: pick(cities, defaults.cities),
            country: pick(country, defaults.country),
        }
    }

    pub fn url_for(&self, kind: FeedKind) -> &str {
        match kind {
            FeedKind::Cities => &self.cities,
            FeedKind::Country => &self.country,
        }
    }
}

/// Everything one download run needs.
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    pub dirs: ProjectDirs,
    pub sources: FeedSources,
    pub request_timeout: Duration,
    pub dry_run: bool,
}
