//! Fetching, converting and storing the IMS feeds.
//!
//! Each feed is fetched once (no retry loop), converted from ISO-8859-8 to
//! UTF-8 and written twice: as the current copy at the project root and as a
//! dated copy under `archive/`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use forecast_common::{FeedKind, ProjectDirs};
use reqwest::Client;
use tokio::fs;
use tracing::{error, info, instrument, warn};

use crate::config::FeedSources;

/// Result of storing one feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedOutcome {
    pub kind: FeedKind,
    pub current: PathBuf,
    pub archive: PathBuf,
    /// Size of the converted UTF-8 document.
    pub bytes: usize,
    /// False for a dry run.
    pub written: bool,
}

/// Overall result of a run over both feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Partial,
    Failed,
}

impl RunStatus {
    /// Process exit code; a partial run still counts as success.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunStatus::Success | RunStatus::Partial => 0,
            RunStatus::Failed => 1,
        }
    }
}

/// Per-feed results of a run, in feed order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<(FeedKind, Result<FeedOutcome, String>)>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|(_, r)| r.is_ok()).count()
    }

    pub fn status(&self) -> RunStatus {
        match self.succeeded() {
            n if n == self.outcomes.len() && n > 0 => RunStatus::Success,
            0 => RunStatus::Failed,
            _ => RunStatus::Partial,
        }
    }
}

/// Downloads feeds into a project directory.
pub struct FeedDownloader {
    client: Client,
    dirs: ProjectDirs,
}

impl FeedDownloader {
    pub fn new(dirs: ProjectDirs, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(request_timeout.min(Duration::from_secs(30)))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, dirs })
    }

    pub fn dirs(&self) -> &ProjectDirs {
        &self.dirs
    }

    /// Single GET; any non-2xx status is an error.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP {} from {}", status, url));
        }

        let body = response
            .bytes()
            .await
            .context("Error reading response body")?;
        info!(bytes = body.len(), "Fetched feed");
        Ok(body.to_vec())
    }

    /// Convert raw feed bytes and write the current and archive copies.
    #[instrument(skip(self, raw), fields(kind = %kind, bytes = raw.len()))]
    pub async fn store_feed(
        &self,
        kind: FeedKind,
        raw: &[u8],
        date: NaiveDate,
        dry_run: bool,
    ) -> Result<FeedOutcome> {
        let content = ims_parser::to_utf8(raw)
            .with_context(|| format!("Failed to convert {} feed to UTF-8", kind))?;

        let current = self.dirs.current_feed_path(kind);
        let archive = self.dirs.archive_path(kind, date);

        let written = save_feed(&content, &current, dry_run).await?;
        save_feed(&content, &archive, dry_run).await?;

        Ok(FeedOutcome {
            kind,
            current,
            archive,
            bytes: content.len(),
            written,
        })
    }

    /// Fetch and store one feed.
    pub async fn download_feed(
        &self,
        kind: FeedKind,
        url: &str,
        date: NaiveDate,
        dry_run: bool,
    ) -> Result<FeedOutcome> {
        info!(%kind, url, "Downloading feed");
        let raw = self
            .fetch(url)
            .await
            .with_context(|| format!("Failed to download {} feed", kind))?;
        self.store_feed(kind, &raw, date, dry_run).await
    }
}

/// Write `content` to `path`, creating parent directories.
///
/// In a dry run nothing is written and `Ok(false)` is returned.
pub async fn save_feed(content: &str, path: &Path, dry_run: bool) -> Result<bool> {
    if dry_run {
        info!(path = %path.display(), bytes = content.len(), "Dry run, not writing");
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), bytes = content.len(), "Saved feed");
    Ok(true)
}

/// Download both feeds independently; one failing does not stop the other.
pub async fn run(
    downloader: &FeedDownloader,
    sources: &FeedSources,
    date: NaiveDate,
    dry_run: bool,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for kind in FeedKind::ALL {
        let result = downloader
            .download_feed(kind, sources.url_for(kind), date, dry_run)
            .await
            .map_err(|e| {
                let message = format!("{:#}", e);
                error!(%kind, error = %message, "Feed download failed");
                message
            });
        summary.outcomes.push((kind, result));
    }

    match summary.status() {
        RunStatus::Success => info!(feeds = summary.succeeded(), "All feeds downloaded"),
        RunStatus::Partial => warn!(
            succeeded = summary.succeeded(),
            total = summary.outcomes.len(),
            "Partial success: some feeds failed"
        ),
        RunStatus::Failed => error!("No feeds downloaded"),
    }

    summary
}
