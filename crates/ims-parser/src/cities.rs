//! Parsing of the per-city forecast feed (`isr_cities.xml`).

use std::collections::BTreeSet;

use chrono::NaiveDate;
use forecast_common::{CityReport, ForecastError};
use tracing::{debug, info, instrument, warn};

use crate::elements;
use crate::error::{ParseError, Result};
use crate::xml::{parent, tag, walk, DayCollector, DayElements, Node};

/// One `<Location>` block with all of its forecast days.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationForecast {
    pub name_eng: Option<String>,
    pub name_heb: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub days: Vec<DayElements>,
}

impl LocationForecast {
    pub fn day(&self, date: NaiveDate) -> Option<&DayElements> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Build the city report for `date`, if this location forecasts it.
    pub fn report_for(&self, date: NaiveDate) -> Option<CityReport> {
        let day = self.day(date)?;
        Some(CityReport {
            name_eng: self.name_eng.clone(),
            name_heb: self.name_heb.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            max_temp: temperature(day, elements::MAX_TEMPERATURE),
            min_temp: temperature(day, elements::MIN_TEMPERATURE),
            weather_code: day.number(elements::WEATHER_CODE),
        })
    }
}

/// Temperatures are whole degrees, but tolerate a decimal point.
fn temperature(day: &DayElements, name: &str) -> Option<i32> {
    let raw = day.get(name)?;
    raw.parse::<i32>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().map(|v| v.round() as i32))
        .or_else(|| {
            warn!(element = name, value = raw, "Unparseable temperature");
            None
        })
}

/// Like temperatures, a bad coordinate only costs its own city, which
/// `CityReport::validate` later drops.
fn coordinate(field: &str, text: &str) -> Option<f64> {
    text.trim()
        .parse()
        .map_err(|_| warn!(element = field, value = text, "Unparseable coordinate"))
        .ok()
}

/// Parse every `<Location>` of the cities feed.
#[instrument(skip(xml), fields(bytes = xml.len()))]
pub fn parse_cities(xml: &str) -> Result<Vec<LocationForecast>> {
    let mut locations = Vec::new();
    let mut current: Option<LocationForecast> = None;
    let mut day: Option<DayCollector> = None;

    walk(xml, |node| {
        match node {
            Node::Open(path) => match tag(path) {
                "Location" => current = Some(LocationForecast::default()),
                "TimeUnitData" => day = Some(DayCollector::default()),
                "Element" => {
                    if let Some(d) = day.as_mut() {
                        d.open_element();
                    }
                }
                _ => {}
            },
            Node::Text(path, text) => {
                if let Some(d) = day.as_mut() {
                    d.text(tag(path), text)?;
                } else if let Some(loc) = current.as_mut() {
                    if parent(path) == "LocationMetaData" {
                        match tag(path) {
                            "LocationNameEng" => loc.name_eng = Some(text.trim().to_string()),
                            "LocationNameHeb" => loc.name_heb = Some(text.trim().to_string()),
                            "DisplayLat" => loc.latitude = coordinate("DisplayLat", text),
                            "DisplayLon" => loc.longitude = coordinate("DisplayLon", text),
                            _ => {}
                        }
                    }
                }
            }
            Node::Close(path) => match tag(path) {
                "Element" => {
                    if let Some(d) = day.as_mut() {
                        d.close_element();
                    }
                }
                "TimeUnitData" => {
                    if let Some(finished) = day.take().and_then(DayCollector::finish) {
                        if let Some(loc) = current.as_mut() {
                            loc.days.push(finished);
                        }
                    }
                }
                "Location" => {
                    if let Some(loc) = current.take() {
                        debug!(name = ?loc.name_eng, days = loc.days.len(), "Parsed location");
                        locations.push(loc);
                    }
                }
                _ => {}
            },
        }
        Ok(())
    })?;

    if locations.is_empty() {
        return Err(ParseError::Empty("locations"));
    }

    info!(count = locations.len(), "Parsed cities feed");
    Ok(locations)
}

/// Every date forecast by at least one location, ascending.
pub fn available_dates(locations: &[LocationForecast]) -> Vec<NaiveDate> {
    locations
        .iter()
        .flat_map(|l| l.days.iter().map(|d| d.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Pick out each location's forecast for `date`.
///
/// Locations that do not forecast the date are skipped; if none do, the
/// error lists the dates the feed does cover.
pub fn extract_day(locations: &[LocationForecast], date: NaiveDate) -> Result<Vec<CityReport>> {
    let reports: Vec<CityReport> = locations
        .iter()
        .filter_map(|loc| {
            let report = loc.report_for(date);
            if report.is_none() {
                warn!(name = ?loc.name_eng, %date, "Location has no forecast for date");
            }
            report
        })
        .collect();

    if reports.is_empty() {
        return Err(ForecastError::DateNotInFeed {
            date: date.format("%Y-%m-%d").to_string(),
            available: available_dates(locations)
                .iter()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .collect(),
        }
        .into());
    }

    Ok(reports)
}
