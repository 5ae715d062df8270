//! Timestamp parsing for log records.
//!
//! Log exporters write timestamps in a handful of shapes: the classic
//! space-separated form, ISO 8601 with a `T` separator (the hand-off form),
//! offset-qualified instants, and bare dates. Everything lands on a naive
//! UTC datetime.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Naive candidate formats, tried in order.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses a log timestamp. Offset-qualified values are converted to UTC and
/// the offset dropped; date-only values land on midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in &DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    None
}

/// Parses a bare `YYYY-MM-DD` date, as written in the `event_date` column.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_space_separated_timestamps() {
        let dt = parse_timestamp("2026-08-19 10:30:00").expect("parse");
        assert_eq!(dt.to_string(), "2026-08-19 10:30:00");
    }

    #[test]
    fn parses_iso_t_separated_timestamps() {
        let dt = parse_timestamp("2026-08-19T10:30:00.123456").expect("parse");
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.and_utc().timestamp_subsec_micros(), 123_456);
    }

    #[test]
    fn converts_offsets_to_utc() {
        let dt = parse_timestamp("2026-08-19T10:30:00+02:00").expect("parse");
        assert_eq!(dt.hour(), 8);
        let dt = parse_timestamp("2026-08-19T10:30:00Z").expect("parse");
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn bare_dates_land_on_midnight() {
        let dt = parse_timestamp("2026-08-19").expect("parse");
        assert_eq!(dt.to_string(), "2026-08-19 00:00:00");
    }

    #[test]
    fn rejects_garbage_and_empty() {
        assert!(parse_timestamp("not-a-date").is_none());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("2026-13-40 99:99:99").is_none());
    }

    #[test]
    fn parses_event_dates() {
        assert_eq!(
            parse_date("2026-08-19"),
            NaiveDate::from_ymd_opt(2026, 8, 19)
        );
        assert!(parse_date("19/08/2026").is_none());
    }
}
