//! Run configuration: source object coordinates and warehouse destination.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A destination table reference did not have the `project.dataset.table`
/// shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid table reference {value:?}: expected project.dataset.table")]
pub struct InvalidTableRef {
    pub value: String,
}

/// Fully qualified warehouse table: `project.dataset.table`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub project: String,
    pub dataset: String,
    pub table: String,
}

impl TableRef {
    pub fn new(
        project: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            dataset: dataset.into(),
            table: table.into(),
        }
    }

    /// Parses a dotted `project.dataset.table` reference. All three segments
    /// must be non-empty.
    pub fn parse(value: &str) -> Result<Self, InvalidTableRef> {
        let mut parts = value.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(project), Some(dataset), Some(table), None)
                if !project.is_empty() && !dataset.is_empty() && !table.is_empty() =>
            {
                Ok(Self::new(project, dataset, table))
            }
            _ => Err(InvalidTableRef {
                value: value.to_string(),
            }),
        }
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}.{}", self.project, self.dataset, self.table)
    }
}

impl FromStr for TableRef {
    type Err = InvalidTableRef;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.project, self.dataset, self.table)
    }
}

/// Everything a single pipeline run needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Source bucket in the object store.
    pub bucket: String,
    /// Object key of the delimited log export.
    pub object: String,
    /// Destination warehouse table.
    pub destination: TableRef,
    /// When set, run every stage except the final load.
    pub dry_run: bool,
}

impl PipelineConfig {
    pub fn new(
        bucket: impl Into<String>,
        object: impl Into<String>,
        destination: TableRef,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            object: object.into(),
            destination,
            dry_run: false,
        }
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_reference() {
        let table = TableRef::parse("analytics.logs.enriched_log_features").expect("valid ref");
        assert_eq!(table.project, "analytics");
        assert_eq!(table.dataset, "logs");
        assert_eq!(table.table, "enriched_log_features");
        assert_eq!(table.qualified_name(), "analytics.logs.enriched_log_features");
    }

    #[test]
    fn rejects_malformed_references() {
        for bad in ["", "analytics", "analytics.logs", "a.b.c.d", "a..c", ".b.c"] {
            assert!(TableRef::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn from_str_matches_parse() {
        let parsed: TableRef = "p.d.t".parse().expect("valid ref");
        assert_eq!(parsed, TableRef::new("p", "d", "t"));
    }

    #[test]
    fn config_defaults_to_live_run() {
        let config = PipelineConfig::new("ops-logs", "2026/08/logs.tsv", TableRef::new("p", "d", "t"));
        assert!(!config.dry_run);
        assert!(config.with_dry_run(true).dry_run);
    }
}
