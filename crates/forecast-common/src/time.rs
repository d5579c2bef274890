//! Date helpers for feed dates and on-image display.

use chrono::{Local, NaiveDate};

use crate::error::{ForecastError, ForecastResult};

/// Format used by the IMS feeds and by archive file names.
pub const FEED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date as it appears in the feeds and on the command line.
pub fn parse_date(s: &str) -> ForecastResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), FEED_DATE_FORMAT)
        .map_err(|_| ForecastError::InvalidDate(s.to_string()))
}

/// `DD/MM/YYYY`, the order Israeli readers expect.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2025-12-04").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 12, 4).unwrap());
    }

    #[test]
    fn test_parse_date_trims_whitespace() {
        assert!(parse_date("  2025-12-04\n").is_ok());
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert!(matches!(
            parse_date("04/12/2025"),
            Err(ForecastError::InvalidDate(_))
        ));
        assert!(parse_date("2025-13-01").is_err());
    }

    #[test]
    fn test_display_date() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 26).unwrap();
        assert_eq!(display_date(date), "26/11/2025");
    }
}
