//! Parser for the Israel Meteorological Service (IMS) XML forecast feeds.
//!
//! The feeds are published in ISO-8859-8. [`encoding::to_utf8`] converts the
//! raw download into a UTF-8 document, which [`cities::parse_cities`] and
//! [`country::parse_country`] then read with quick-xml.

pub mod cities;
pub mod country;
pub mod encoding;
pub mod error;
mod xml;

pub use cities::{extract_day, parse_cities, LocationForecast};
pub use country::{description_for, parse_country};
pub use encoding::to_utf8;
pub use error::{ParseError, Result};
pub use xml::DayElements;

/// Element names used inside `<TimeUnitData>`.
pub mod elements {
    pub const MAX_TEMPERATURE: &str = "Maximum temperature";
    pub const MIN_TEMPERATURE: &str = "Minimum temperature";
    pub const WEATHER_CODE: &str = "Weather code";
    pub const WEATHER: &str = "Weather";
    pub const WEATHER_HEBREW: &str = "Weather in Hebrew";
}
