//! Error types for warehouse operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while appending to or inspecting a table.
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// The frame does not conform to the destination table schema.
    #[error("schema mismatch for {table}: {}", .problems.join("; "))]
    SchemaMismatch {
        table: String,
        problems: Vec<String>,
    },

    /// An existing table was created under a different schema version.
    #[error("table {table} already exists with schema version {existing}, expected {expected}")]
    SchemaVersionConflict {
        table: String,
        existing: u32,
        expected: u32,
    },

    /// Filesystem failure under the warehouse root.
    #[error("warehouse io at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A schema sidecar could not be read or written.
    #[error("schema sidecar: {0}")]
    Json(#[from] serde_json::Error),

    /// A part file could not be read or written.
    #[error("part file: {0}")]
    Csv(#[from] csv::Error),
}

impl WarehouseError {
    /// Create a SchemaMismatch error.
    pub fn schema_mismatch(table: impl Into<String>, problems: Vec<String>) -> Self {
        Self::SchemaMismatch {
            table: table.into(),
            problems,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for warehouse operations.
pub type Result<T> = std::result::Result<T, WarehouseError>;
