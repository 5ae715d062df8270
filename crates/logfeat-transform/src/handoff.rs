//! Hand-off serialization.
//!
//! The enriched frame crosses the stage boundary as comma-delimited text.
//! This is the canonical wire form: header row first, one record per frame
//! row in frame column order, null cells as empty fields, quotes only where
//! a cell needs them.

use polars::prelude::{AnyValue, DataFrame};
use tracing::debug;

use logfeat_ingest::any_to_string;

use crate::error::{Result, TransformError};

/// Serializes an enriched frame to the hand-off payload.
pub fn handoff_to_csv(df: &DataFrame) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    writer.write_record(&names)?;

    let columns = df.get_columns();
    for row in 0..df.height() {
        let mut record = Vec::with_capacity(columns.len());
        for column in columns {
            let value = column.get(row).unwrap_or(AnyValue::Null);
            record.push(any_to_string(value));
        }
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| TransformError::Io(err.into_error()))?;
    debug!(rows = df.height(), bytes = bytes.len(), "serialized hand-off");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
