//! Parsing of the country-wide forecast feed (`isr_country.xml`).

use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::elements;
use crate::error::{ParseError, Result};
use crate::xml::{tag, walk, DayCollector, DayElements, Node};

/// Parse every `<TimeUnitData>` block of the country feed.
#[instrument(skip(xml), fields(bytes = xml.len()))]
pub fn parse_country(xml: &str) -> Result<Vec<DayElements>> {
    let mut days = Vec::new();
    let mut day: Option<DayCollector> = None;

    walk(xml, |node| {
        match node {
            Node::Open(path) => match tag(path) {
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
                        days.push(finished);
                    }
                }
                _ => {}
            },
        }
        Ok(())
    })?;

    if days.is_empty() {
        return Err(ParseError::Empty("forecast days"));
    }

    info!(count = days.len(), "Parsed country feed");
    Ok(days)
}

/// Textual forecast for `date`, preferring the Hebrew wording.
pub fn description_for(days: &[DayElements], date: NaiveDate) -> Option<String> {
    let day = days.iter().find(|d| d.date == date)?;
    day.get(elements::WEATHER_HEBREW)
        .or_else(|| day.get(elements::WEATHER))
        .map(str::to_string)
}
