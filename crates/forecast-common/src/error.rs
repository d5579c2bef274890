//! Error types for forecast data handling.

use thiserror::Error;

/// Result type alias using ForecastError.
pub type ForecastResult<T> = Result<T, ForecastError>;

/// Primary error type for forecast data operations.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("City '{city}' missing data: {}", fields.join(", "))]
    MissingFields {
        city: String,
        fields: Vec<&'static str>,
    },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Forecast for {date} not found in feed (available: {})", available.join(", "))]
    DateNotInFeed { date: String, available: Vec<String> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
