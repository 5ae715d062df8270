//! Polars AnyValue utility functions.
//!
//! Helpers for converting Polars `AnyValue` cells to and from the canonical
//! text forms used by the delimited hand-off and warehouse part files.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use polars::prelude::{AnyValue, TimeUnit};

const SECONDS_PER_DAY: i64 = 86_400;

/// Converts a Polars AnyValue to its canonical text form.
/// Returns empty string for Null; temporal values render in ISO 8601.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        AnyValue::Datetime(v, unit, _) => datetime_to_naive(v, unit)
            .map(|dt| format_datetime(&dt))
            .unwrap_or_default(),
        AnyValue::DatetimeOwned(v, unit, _) => datetime_to_naive(v, unit)
            .map(|dt| format_datetime(&dt))
            .unwrap_or_default(),
        AnyValue::Date(days) => epoch_days_to_date(days)
            .map(|date| format_date(&date))
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

/// Formats a floating-point number as the shortest decimal string that
/// round-trips back to the same value.
pub fn format_numeric(v: f64) -> String {
    format!("{v}")
}

/// Canonical timestamp text form: ISO 8601 with a `T` separator and the
/// fractional part only when non-zero.
pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Canonical date text form: `YYYY-MM-DD`.
pub fn format_date(value: &NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// Converts a raw Polars datetime payload to a naive UTC datetime.
pub fn datetime_to_naive(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let instant = match unit {
        TimeUnit::Milliseconds => DateTime::<Utc>::from_timestamp_millis(value),
        TimeUnit::Microseconds => DateTime::<Utc>::from_timestamp_micros(value),
        TimeUnit::Nanoseconds => Some(DateTime::<Utc>::from_timestamp_nanos(value)),
    };
    instant.map(|dt| dt.naive_utc())
}

/// Converts a Polars date payload (days since the Unix epoch) to a naive date.
pub fn epoch_days_to_date(days: i32) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(i64::from(days) * SECONDS_PER_DAY, 0)
        .map(|dt| dt.date_naive())
}

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<f64>().ok()
}

/// Parses a string as i64, returning None for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<i64>().ok()
}
