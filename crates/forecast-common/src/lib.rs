//! Common types and utilities shared across the forecast story services.

pub mod city;
pub mod error;
pub mod feed;
pub mod logging;
pub mod paths;
pub mod time;

pub use city::{
    check_city_count, format_temperature_range, CityForecast, CityReport, ForecastDay,
    EXPECTED_CITY_COUNT,
};
pub use error::{ForecastError, ForecastResult};
pub use feed::FeedKind;
pub use paths::ProjectDirs;
