//! Structured run reporting emitted at the end of a pipeline run.

use serde::{Deserialize, Serialize};

/// Timing and row count for one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: String,
    /// Rows flowing out of the stage, where the stage has a row count.
    pub rows: Option<usize>,
    pub duration_ms: u64,
}

impl StageReport {
    pub fn new(stage: impl Into<String>, rows: Option<usize>, duration_ms: u64) -> Self {
        Self {
            stage: stage.into(),
            rows,
            duration_ms,
        }
    }
}

/// Summary of a full ingest-to-load run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub bucket: String,
    pub object: String,
    pub destination: String,
    pub schema_version: u32,
    /// Rows read from the source object.
    pub input_rows: usize,
    /// Rows appended to the warehouse, absent on dry runs.
    pub loaded_rows: Option<usize>,
    pub dry_run: bool,
    pub stages: Vec<StageReport>,
}

impl RunReport {
    pub fn total_duration_ms(&self) -> u64 {
        self.stages.iter().map(|stage| stage.duration_ms).sum()
    }
}
