//! Hand-off re-typing.
//!
//! The delimited hand-off loses type fidelity, so the load side re-coerces
//! every cell against the table schema before anything reaches the warehouse.
//! Coercion is strict: a cell that does not fit its target type fails the
//! batch, naming the column, the value, and the target.

use csv::{ReaderBuilder, StringRecord};
use polars::prelude::{
    Column, DataFrame, DateChunked, DatetimeChunked, IntoSeries, NamedFrom, Series, TimeUnit,
};
use tracing::{debug, warn};

use logfeat_ingest::{parse_f64, parse_i64};
use logfeat_model::{ColumnSpec, ColumnType, TableSchema};

use crate::datetime::{parse_date, parse_timestamp};
use crate::error::{Result, TransformError};

// Beyond 2^53 an f64 spelling no longer identifies one integer.
const MAX_EXACT_INT_F64: f64 = 9_007_199_254_740_992.0;

/// Re-types the hand-off payload against the table schema.
///
/// Columns the schema does not know are dropped with a warning; the result
/// carries exactly the schema columns, in schema order. A header-only payload
/// yields a valid zero-row frame, while an empty or all-whitespace payload is
/// rejected outright.
pub fn coerce_handoff(payload: &str, schema: &TableSchema) -> Result<DataFrame> {
    if payload.trim().is_empty() {
        return Err(TransformError::EmptyInput);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(payload.as_bytes());
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut indices: Vec<(usize, &ColumnSpec)> = Vec::with_capacity(schema.columns.len());
    let mut missing: Vec<String> = Vec::new();
    for spec in &schema.columns {
        match headers.iter().position(|header| *header == spec.name) {
            Some(idx) => indices.push((idx, spec)),
            None => missing.push(spec.name.clone()),
        }
    }
    if !missing.is_empty() {
        return Err(TransformError::schema(missing, headers));
    }
    for header in &headers {
        if schema.column(header).is_none() {
            warn!(column = header.as_str(), "dropping column not in schema");
        }
    }

    let mut rows: Vec<StringRecord> = Vec::new();
    for record in reader.records() {
        rows.push(record?);
    }

    let mut columns: Vec<Column> = Vec::with_capacity(indices.len());
    for (idx, spec) in indices {
        columns.push(coerce_column(&rows, idx, spec)?);
    }
    let frame = DataFrame::new(columns)?;
    debug!(rows = frame.height(), "coerced hand-off");
    Ok(frame)
}

fn coerce_column(rows: &[StringRecord], idx: usize, spec: &ColumnSpec) -> Result<Column> {
    match spec.column_type {
        ColumnType::Timestamp => {
            let mut values = Vec::with_capacity(rows.len());
            for record in rows {
                let raw = record.get(idx).unwrap_or("");
                values.push(match nullable_cell(raw, spec)? {
                    None => None,
                    Some(cell) => Some(
                        parse_timestamp(cell).ok_or_else(|| cell_error(spec, raw))?,
                    ),
                });
            }
            Ok(DatetimeChunked::from_naive_datetime_options(
                spec.name.as_str().into(),
                values,
                TimeUnit::Microseconds,
            )
            .into_series()
            .into())
        }
        ColumnType::Date => {
            let mut values = Vec::with_capacity(rows.len());
            for record in rows {
                let raw = record.get(idx).unwrap_or("");
                values.push(match nullable_cell(raw, spec)? {
                    None => None,
                    Some(cell) => Some(parse_date(cell).ok_or_else(|| cell_error(spec, raw))?),
                });
            }
            Ok(
                DateChunked::from_naive_date_options(spec.name.as_str().into(), values)
                    .into_series()
                    .into(),
            )
        }
        ColumnType::Int => {
            let mut values: Vec<Option<i64>> = Vec::with_capacity(rows.len());
            for record in rows {
                let raw = record.get(idx).unwrap_or("");
                values.push(match nullable_cell(raw, spec)? {
                    None => None,
                    Some(cell) => Some(
                        parse_i64(cell)
                            .or_else(|| parse_f64(cell).and_then(int_from_float_spelling))
                            .ok_or_else(|| cell_error(spec, raw))?,
                    ),
                });
            }
            Ok(Series::new(spec.name.as_str().into(), values).into())
        }
        ColumnType::Float => {
            let mut values: Vec<Option<f64>> = Vec::with_capacity(rows.len());
            for record in rows {
                let raw = record.get(idx).unwrap_or("");
                values.push(match nullable_cell(raw, spec)? {
                    None => None,
                    Some(cell) => Some(parse_f64(cell).ok_or_else(|| cell_error(spec, raw))?),
                });
            }
            Ok(Series::new(spec.name.as_str().into(), values).into())
        }
        ColumnType::Text => {
            let mut values: Vec<&str> = Vec::with_capacity(rows.len());
            for record in rows {
                values.push(record.get(idx).unwrap_or(""));
            }
            Ok(Series::new(spec.name.as_str().into(), values).into())
        }
    }
}

/// Resolves the empty-cell rule for one typed cell: empty means null for a
/// nullable column and a coercion failure otherwise.
fn nullable_cell<'a>(raw: &'a str, spec: &ColumnSpec) -> Result<Option<&'a str>> {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        return Ok(Some(trimmed));
    }
    if spec.nullable {
        Ok(None)
    } else {
        Err(cell_error(spec, raw))
    }
}

fn cell_error(spec: &ColumnSpec, raw: &str) -> TransformError {
    TransformError::coercion(spec.name.as_str(), raw, spec.column_type)
}

fn int_from_float_spelling(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INT_F64 {
        Some(value as i64)
    } else {
        None
    }
}
