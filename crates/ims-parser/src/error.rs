//! Error types for the ims-parser crate.

use forecast_common::ForecastError;
use thiserror::Error;

/// Errors that can occur while decoding or parsing a feed.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("XML parsing error at position {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Feed contains no {0}")]
    Empty(&'static str),

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

/// Result type for parser operations.
pub type Result<T> = std::result::Result<T, ParseError>;
