//! The enriched-table schema contract.
//!
//! The hand-off between the feature-engineering stage and the load stage is a
//! delimited text representation, which loses type fidelity. This module
//! defines the versioned schema (column names + target types) that the
//! coercion layer checks against and the warehouse enforces before appending.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Version of the enriched-table schema carried across the hand-off.
pub const SCHEMA_VERSION: u32 = 1;

/// Canonical raw column labels after normalization.
pub const COL_TIMESTAMP: &str = "timestamp";
pub const COL_LOG_LEVEL: &str = "log_level";
pub const COL_SERVICE: &str = "service";
pub const COL_MESSAGE: &str = "message";
pub const COL_USER_ID: &str = "user_id";

/// Derived column labels added by the feature engine.
pub const COL_EVENT_DATE: &str = "event_date";
pub const COL_HOUR_OF_DAY: &str = "hour_of_day";
pub const COL_IS_ERROR: &str = "is_error";
pub const COL_LOG_LEVEL_ENCODED: &str = "log_level_encoded";
pub const COL_MESSAGE_LENGTH: &str = "message_length";
pub const COL_SERVICE_ERROR_RATE: &str = "service_error_rate";

/// Columns that must be present after normalization for a batch to proceed.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_TIMESTAMP,
    COL_LOG_LEVEL,
    COL_SERVICE,
    COL_MESSAGE,
    COL_USER_ID,
];

/// Target type of a schema column after coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Date + time instant (microsecond precision).
    Timestamp,
    /// Calendar date without a time component.
    Date,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// Passthrough text.
    Text,
}

impl ColumnType {
    /// Canonical name used in coercion error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Timestamp => "timestamp",
            ColumnType::Date => "date",
            ColumnType::Int => "int64",
            ColumnType::Float => "float64",
            ColumnType::Text => "text",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single column of the enriched-table contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Canonical (lower-case, trimmed) column label.
    pub name: String,
    /// Target type after coercion.
    pub column_type: ColumnType,
    /// Whether missing values are allowed through coercion and load.
    pub nullable: bool,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
        }
    }

    /// Marks the column as accepting missing values.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// The versioned enriched-table schema: column order here is the frame and
/// hand-off order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub version: u32,
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    /// The enriched log-feature table: the five raw columns followed by the
    /// six derived columns in derivation order.
    pub fn enriched() -> Self {
        Self {
            version: SCHEMA_VERSION,
            columns: vec![
                ColumnSpec::new(COL_TIMESTAMP, ColumnType::Timestamp),
                ColumnSpec::new(COL_LOG_LEVEL, ColumnType::Text),
                ColumnSpec::new(COL_SERVICE, ColumnType::Text),
                ColumnSpec::new(COL_MESSAGE, ColumnType::Text),
                ColumnSpec::new(COL_USER_ID, ColumnType::Int),
                ColumnSpec::new(COL_EVENT_DATE, ColumnType::Date),
                ColumnSpec::new(COL_HOUR_OF_DAY, ColumnType::Int),
                ColumnSpec::new(COL_IS_ERROR, ColumnType::Int),
                // Levels outside the INFO/WARN/ERROR mapping encode as null,
                // so this column must admit missing values end to end.
                ColumnSpec::new(COL_LOG_LEVEL_ENCODED, ColumnType::Int).nullable(),
                ColumnSpec::new(COL_MESSAGE_LENGTH, ColumnType::Int),
                ColumnSpec::new(COL_SERVICE_ERROR_RATE, ColumnType::Float),
            ],
        }
    }

    /// Looks up a column spec by exact canonical name.
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|spec| spec.name == name)
    }

    /// Column labels in frame order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|spec| spec.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enriched_schema_covers_required_columns() {
        let schema = TableSchema::enriched();
        for name in REQUIRED_COLUMNS {
            assert!(schema.column(name).is_some(), "missing {name}");
        }
        assert_eq!(schema.columns.len(), 11);
        assert_eq!(schema.version, SCHEMA_VERSION);
    }

    #[test]
    fn only_encoded_level_is_nullable() {
        let schema = TableSchema::enriched();
        for spec in &schema.columns {
            assert_eq!(
                spec.nullable,
                spec.name == COL_LOG_LEVEL_ENCODED,
                "unexpected nullability for {}",
                spec.name
            );
        }
    }

    #[test]
    fn derived_columns_follow_raw_columns() {
        let schema = TableSchema::enriched();
        let names = schema.column_names();
        assert_eq!(
            &names[..5],
            &[COL_TIMESTAMP, COL_LOG_LEVEL, COL_SERVICE, COL_MESSAGE, COL_USER_ID]
        );
        assert_eq!(names[5], COL_EVENT_DATE);
        assert_eq!(names[10], COL_SERVICE_ERROR_RATE);
    }

    #[test]
    fn schema_serializes() {
        let schema = TableSchema::enriched();
        let json = serde_json::to_string(&schema).expect("serialize schema");
        let round: TableSchema = serde_json::from_str(&json).expect("deserialize schema");
        assert_eq!(round, schema);
    }
}
