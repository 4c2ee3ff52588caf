//! Date formatting and parsing shared by models and validation

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Localized medium date, e.g. "Mar 15, 2024"
pub fn medium_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// ISO calendar date, e.g. "2024-03-15"
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Medium date or an empty string when absent
pub fn medium_date_or_empty(date: Option<NaiveDate>) -> String {
    date.map(medium_date).unwrap_or_default()
}

/// Parse an ISO-8601 date or date-time into a calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` and RFC 3339 timestamps.
pub fn parse_iso8601(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medium_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(medium_date(date), "Mar 5, 2024");
        assert_eq!(iso_date(date), "2024-03-05");
    }

    #[test]
    fn test_parse_iso8601() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(parse_iso8601("2024-03-15"), expected);
        assert_eq!(parse_iso8601(" 2024-03-15 "), expected);
        assert_eq!(parse_iso8601("2024-03-15T10:30:00Z"), expected);
        assert_eq!(parse_iso8601("2024-03-15T10:30"), expected);
        assert_eq!(parse_iso8601("2024-02-30"), None);
        assert_eq!(parse_iso8601("15/03/2024"), None);
        assert_eq!(parse_iso8601(""), None);
    }
}
