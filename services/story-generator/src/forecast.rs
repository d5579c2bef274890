//! Building a [`ForecastDay`] from the feeds saved by the downloader.

use std::path::Path;

use chrono::NaiveDate;
use forecast_common::{check_city_count, FeedKind, ForecastDay, ProjectDirs};
use tracing::{info, instrument, warn};

use crate::error::{StoryError, StoryResult};

fn read_feed(path: &Path) -> StoryResult<String> {
    std::fs::read_to_string(path).map_err(|source| StoryError::Feed {
        path: path.to_path_buf(),
        source,
    })
}

/// Country-wide text for `date`. The story is still drawn without it, so
/// every failure here is only a warning.
fn load_description(dirs: &ProjectDirs, date: NaiveDate) -> Option<String> {
    let path = dirs.current_feed_path(FeedKind::Country);
    let xml = match read_feed(&path) {
        Ok(xml) => xml,
        Err(e) => {
            warn!(error = %e, "Country feed unavailable, no description");
            return None;
        }
    };

    match ims_parser::parse_country(&xml) {
        Ok(days) => {
            let description = ims_parser::description_for(&days, date);
            if description.is_none() {
                warn!(%date, "No country description for date");
            }
            description
        }
        Err(e) => {
            warn!(error = %e, "Country feed could not be parsed");
            None
        }
    }
}

/// Parse the current cities feed and pick out `date`.
///
/// A missing or unparsable cities feed, or a date the feed does not cover,
/// is an error. Incomplete cities are dropped with a warning.
#[instrument(skip(dirs), fields(root = %dirs.root().display()))]
pub fn load_forecast_day(dirs: &ProjectDirs, date: NaiveDate) -> StoryResult<ForecastDay> {
    let xml = read_feed(&dirs.current_feed_path(FeedKind::Cities))?;
    let locations = ims_parser::parse_cities(&xml)?;
    let reports = ims_parser::extract_day(&locations, date)?;

    let day = ForecastDay::from_reports(date, reports, load_description(dirs, date));
    check_city_count(&day.cities);

    info!(
        cities = day.cities.len(),
        has_description = day.description.is_some(),
        "Forecast extracted"
    );
    Ok(day)
}
