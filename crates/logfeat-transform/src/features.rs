//! Feature derivation over a validated batch.
//!
//! Takes the all-text frame and adds the six analytic columns, replacing the
//! timestamp text with a proper datetime column on the way. Derivation is
//! row-complete: one unparseable timestamp aborts the whole batch rather than
//! loading a partial one.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use polars::prelude::{
    DataFrame, DateChunked, DatetimeChunked, IntoSeries, NamedFrom, Series, TimeUnit,
};
use tracing::debug;

use logfeat_model::{
    COL_EVENT_DATE, COL_HOUR_OF_DAY, COL_IS_ERROR, COL_LOG_LEVEL, COL_LOG_LEVEL_ENCODED,
    COL_MESSAGE, COL_MESSAGE_LENGTH, COL_SERVICE, COL_SERVICE_ERROR_RATE, COL_TIMESTAMP, LogLevel,
};

use crate::datetime::parse_timestamp;
use crate::error::{Result, TransformError};

#[derive(Debug, Default)]
struct ServiceTally {
    errors: usize,
    rows: usize,
}

impl ServiceTally {
    fn rate(&self) -> f64 {
        self.errors as f64 / self.rows as f64
    }
}

/// Adds the derived feature columns to a validated batch frame.
///
/// The input frame carries text columns as read; the output replaces
/// `timestamp` with a microsecond datetime column and appends, in order:
/// `event_date`, `hour_of_day`, `is_error`, `log_level_encoded`,
/// `message_length`, `service_error_rate`. Already-present columns with those
/// labels are overwritten.
pub fn engineer_features(mut df: DataFrame) -> Result<DataFrame> {
    let height = df.height();

    let mut times: Vec<NaiveDateTime> = Vec::with_capacity(height);
    {
        let timestamps = df.column(COL_TIMESTAMP)?.str()?;
        for (row, value) in timestamps.iter().enumerate() {
            let raw = value.unwrap_or("");
            let parsed = parse_timestamp(raw)
                .ok_or_else(|| TransformError::parse(COL_TIMESTAMP, row, raw))?;
            times.push(parsed);
        }
    }

    let mut error_flags: Vec<bool> = Vec::with_capacity(height);
    let mut encoded: Vec<Option<i64>> = Vec::with_capacity(height);
    {
        let levels = df.column(COL_LOG_LEVEL)?.str()?;
        for value in levels.iter() {
            let level = LogLevel::parse(value.unwrap_or(""));
            error_flags.push(level == Some(LogLevel::Error));
            encoded.push(level.map(LogLevel::encode));
        }
    }

    let mut message_lengths: Vec<i64> = Vec::with_capacity(height);
    {
        let messages = df.column(COL_MESSAGE)?.str()?;
        for value in messages.iter() {
            message_lengths.push(value.unwrap_or("").chars().count() as i64);
        }
    }

    let mut services: Vec<String> = Vec::with_capacity(height);
    {
        let column = df.column(COL_SERVICE)?.str()?;
        for value in column.iter() {
            services.push(value.unwrap_or("").to_string());
        }
    }

    let mut tallies: BTreeMap<&str, ServiceTally> = BTreeMap::new();
    for (service, flag) in services.iter().zip(&error_flags) {
        let tally = tallies.entry(service.as_str()).or_default();
        tally.rows += 1;
        if *flag {
            tally.errors += 1;
        }
    }
    let rates: Vec<f64> = services
        .iter()
        .map(|service| {
            tallies
                .get(service.as_str())
                .map_or(0.0, ServiceTally::rate)
        })
        .collect();

    let dates: Vec<NaiveDate> = times.iter().map(|dt| dt.date()).collect();
    let hours: Vec<i64> = times.iter().map(|dt| i64::from(dt.hour())).collect();
    let is_error: Vec<i64> = error_flags.iter().map(|&flag| i64::from(flag)).collect();

    debug!(
        rows = height,
        services = tallies.len(),
        "derived feature columns"
    );

    df.with_column(
        DatetimeChunked::from_naive_datetime(COL_TIMESTAMP.into(), times, TimeUnit::Microseconds)
            .into_series(),
    )?;
    df.with_column(DateChunked::from_naive_date(COL_EVENT_DATE.into(), dates).into_series())?;
    df.with_column(Series::new(COL_HOUR_OF_DAY.into(), hours))?;
    df.with_column(Series::new(COL_IS_ERROR.into(), is_error))?;
    df.with_column(Series::new(COL_LOG_LEVEL_ENCODED.into(), encoded))?;
    df.with_column(Series::new(COL_MESSAGE_LENGTH.into(), message_lengths))?;
    df.with_column(Series::new(COL_SERVICE_ERROR_RATE.into(), rates))?;

    Ok(df)
}
