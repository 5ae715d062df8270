//! Error types for the transformation stages.

use polars::prelude::PolarsError;
use thiserror::Error;

use logfeat_model::ColumnType;

/// Errors that can occur between raw table and coerced frame.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Required columns are absent after normalization.
    #[error(
        "missing required columns: {}; found columns: {}",
        .missing.join(", "),
        if .found.is_empty() { "(none)".to_string() } else { .found.join(", ") }
    )]
    Schema {
        missing: Vec<String>,
        found: Vec<String>,
    },

    /// A cell could not be parsed during feature derivation.
    #[error("cannot parse {value:?} in column {column} at row {row}")]
    Parse {
        column: String,
        /// Zero-based data row index within the batch.
        row: usize,
        value: String,
    },

    /// A hand-off cell could not be coerced to its target type.
    #[error("cannot coerce {value:?} to {target} in column {column}")]
    Coercion {
        column: String,
        value: String,
        target: ColumnType,
    },

    /// The hand-off payload was empty or whitespace.
    #[error("hand-off payload is empty")]
    EmptyInput,

    /// Frame-level failure inside Polars.
    #[error(transparent)]
    Frame(#[from] PolarsError),

    /// Delimited reading or writing failed.
    #[error("hand-off csv: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure while serializing the hand-off.
    #[error("serialize hand-off: {0}")]
    Io(#[from] std::io::Error),
}

impl TransformError {
    /// Create a Schema error.
    pub fn schema(missing: Vec<String>, found: Vec<String>) -> Self {
        Self::Schema { missing, found }
    }

    /// Create a Parse error.
    pub fn parse(column: impl Into<String>, row: usize, value: impl Into<String>) -> Self {
        Self::Parse {
            column: column.into(),
            row,
            value: value.into(),
        }
    }

    /// Create a Coercion error.
    pub fn coercion(
        column: impl Into<String>,
        value: impl Into<String>,
        target: ColumnType,
    ) -> Self {
        Self::Coercion {
            column: column.into(),
            value: value.into(),
            target,
        }
    }
}

/// Result type alias for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
