//! Per-city forecast records.
//!
//! The parser produces a [`CityReport`] for every location in the feed, with
//! each field optional since the feed is not guaranteed to be complete.
//! [`CityReport::validate`] turns it into a [`CityForecast`] that is safe to draw.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ForecastError, ForecastResult};

/// Number of cities the story layout is designed for.
pub const EXPECTED_CITY_COUNT: usize = 15;

/// A city's forecast for one day as read from the feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityReport {
    pub name_eng: Option<String>,
    pub name_heb: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub max_temp: Option<i32>,
    pub min_temp: Option<i32>,
    pub weather_code: Option<u32>,
}

/// A city forecast with every field present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityForecast {
    pub name_eng: String,
    pub name_heb: String,
    pub latitude: f64,
    pub longitude: f64,
    pub max_temp: i32,
    pub min_temp: i32,
    pub weather_code: u32,
}

impl CityForecast {
    /// Temperature label drawn under the city name.
    pub fn temperature_label(&self) -> String {
        format_temperature_range(self.min_temp, self.max_temp)
    }
}

impl CityReport {
    /// Names of the required fields that are absent.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let checks: [(&'static str, bool); 7] = [
            ("name_eng", self.name_eng.is_none()),
            ("name_heb", self.name_heb.is_none()),
            ("latitude", self.latitude.is_none()),
            ("longitude", self.longitude.is_none()),
            ("max_temp", self.max_temp.is_none()),
            ("min_temp", self.min_temp.is_none()),
            ("weather_code", self.weather_code.is_none()),
        ];
        checks
            .iter()
            .filter(|(_, missing)| *missing)
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn validate(self) -> ForecastResult<CityForecast> {
        match self {
            CityReport {
                name_eng: Some(name_eng),
                name_heb: Some(name_heb),
                latitude: Some(latitude),
                longitude: Some(longitude),
                max_temp: Some(max_temp),
                min_temp: Some(min_temp),
                weather_code: Some(weather_code),
            } => Ok(CityForecast {
                name_eng,
                name_heb,
                latitude,
                longitude,
                max_temp,
                min_temp,
                weather_code,
            }),
            report => {
                let fields = report.missing_fields();
                Err(ForecastError::MissingFields {
                    city: report.name_eng.unwrap_or_else(|| "Unknown".to_string()),
                    fields,
                })
            }
        }
    }
}

/// Everything drawn on one day's story image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub cities: Vec<CityForecast>,
    /// Country-wide forecast text, if the country feed was available.
    pub description: Option<String>,
}

impl ForecastDay {
    /// Validate every report, dropping (and logging) incomplete ones.
    pub fn from_reports(
        date: NaiveDate,
        reports: Vec<CityReport>,
        description: Option<String>,
    ) -> Self {
        let cities = reports
            .into_iter()
            .filter_map(|report| match report.validate() {
                Ok(city) => Some(city),
                Err(e) => {
                    warn!(error = %e, "Skipping incomplete city");
                    None
                }
            })
            .collect();

        Self {
            date,
            cities,
            description,
        }
    }
}

/// Format a temperature range for display, e.g. `18-27°C`.
pub fn format_temperature_range(min_temp: i32, max_temp: i32) -> String {
    format!("{}-{}°C", min_temp, max_temp)
}

/// Compare the number of cities against the layout's expectation.
///
/// A mismatch is logged but is not fatal; the story is still rendered.
pub fn check_city_count(cities: &[CityForecast]) -> bool {
    if cities.len() == EXPECTED_CITY_COUNT {
        info!(count = cities.len(), "City count validation: OK");
        true
    } else {
        warn!(
            expected = EXPECTED_CITY_COUNT,
            actual = cities.len(),
            "City count mismatch"
        );
        false
    }
}
