//! Frame-against-schema checking at the load boundary.
//!
//! Everything upstream works hard to produce a conformant frame; the
//! warehouse still refuses anything that does not match the destination
//! contract exactly, so a bug upstream cannot corrupt the table.

use polars::prelude::{DataFrame, DataType, TimeUnit};

use logfeat_model::{ColumnType, TableSchema};

/// The Polars dtype a schema column must carry at load time.
pub fn expected_dtype(ty: ColumnType) -> DataType {
    match ty {
        ColumnType::Timestamp => DataType::Datetime(TimeUnit::Microseconds, None),
        ColumnType::Date => DataType::Date,
        ColumnType::Int => DataType::Int64,
        ColumnType::Float => DataType::Float64,
        ColumnType::Text => DataType::String,
    }
}

/// Collects every way the frame deviates from the table schema: wrong column
/// order or names, wrong dtypes, nulls in non-nullable columns, extra
/// columns. Empty result means the frame is loadable.
pub fn schema_problems(df: &DataFrame, schema: &TableSchema) -> Vec<String> {
    let mut problems = Vec::new();
    let columns = df.get_columns();

    for (idx, spec) in schema.columns.iter().enumerate() {
        let Some(column) = columns.get(idx) else {
            problems.push(format!("missing column {}", spec.name));
            continue;
        };
        if column.name().as_str() != spec.name.as_str() {
            problems.push(format!(
                "column {idx}: expected {}, found {}",
                spec.name,
                column.name()
            ));
            continue;
        }
        let expected = expected_dtype(spec.column_type);
        if column.dtype() != &expected {
            problems.push(format!(
                "column {}: expected {expected}, found {}",
                spec.name,
                column.dtype()
            ));
        }
        if !spec.nullable && column.null_count() > 0 {
            problems.push(format!(
                "column {}: {} null values in non-nullable column",
                spec.name,
                column.null_count()
            ));
        }
    }

    for column in columns.iter().skip(schema.columns.len()) {
        problems.push(format!("unexpected column {}", column.name()));
    }

    problems
}
