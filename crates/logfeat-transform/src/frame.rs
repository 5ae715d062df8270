//! DataFrame construction from raw tables.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use logfeat_ingest::RawTable;

use crate::error::Result;

/// Builds an all-text frame from a validated raw table, one string column per
/// header in header order. Duplicate labels surface as a frame error.
pub fn table_to_frame(table: &RawTable) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(table.width());
    for (idx, header) in table.headers.iter().enumerate() {
        let mut values: Vec<&str> = Vec::with_capacity(table.height());
        for row in &table.rows {
            values.push(row.get(idx).map(String::as_str).unwrap_or(""));
        }
        columns.push(Series::new(header.as_str().into(), values).into());
    }
    let frame = DataFrame::new(columns)?;
    Ok(frame)
}
