use chrono::{Local, NaiveDate};

use crate::error::{Error, Result};

/// Display format used in URLs, forms, and rendered pages.
pub const DISPLAY_FORMAT: &str = "%d-%m-%Y";

/// Parses a `DD-MM-YYYY` string into a calendar date.
/// Nonexistent dates (e.g. `31-02-2024`) are rejected, not rolled over.
pub fn parse_display_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DISPLAY_FORMAT).map_err(|_| Error::DateFormat(raw.to_string()))
}

pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_format_round_trip() {
        for raw in ["15-06-2025", "01-01-2000", "29-02-2024", "31-12-1999"] {
            let date = parse_display_date(raw).unwrap();
            assert_eq!(format_display_date(date), raw);
        }
    }

    #[test]
    fn rejects_nonexistent_dates() {
        let err = parse_display_date("31-02-2024").unwrap_err();
        assert!(matches!(err, Error::DateFormat(_)));
    }

    #[test]
    fn rejects_malformed_input() {
        for raw in ["not-a-date", "2025-06-15", "15/06/2025", ""] {
            assert!(matches!(
                parse_display_date(raw),
                Err(Error::DateFormat(_))
            ));
        }
    }
}
