//! Filesystem-backed warehouse.
//!
//! Tables live at `root/project/dataset/table`: a `schema.json` sidecar
//! pins the schema the table was created under, and each append lands as a
//! numbered part file in the canonical text form. Parts are streamed to a
//! temporary name and renamed into place once flushed, so an interrupted
//! run leaves at most a temp file that part counting ignores.

use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::{AnyValue, DataFrame};
use tracing::info;

use logfeat_ingest::any_to_string;
use logfeat_model::{TableRef, TableSchema};

use crate::check::schema_problems;
use crate::client::{LoadReceipt, Warehouse};
use crate::error::{Result, WarehouseError};

const SCHEMA_FILE: &str = "schema.json";

/// Warehouse rooted in a local directory.
#[derive(Debug, Clone)]
pub struct FsWarehouse {
    root: PathBuf,
}

impl FsWarehouse {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn table_dir(&self, table: &TableRef) -> PathBuf {
        self.root
            .join(&table.project)
            .join(&table.dataset)
            .join(&table.table)
    }

    /// Reads the schema sidecar of an existing table, None if the table has
    /// never been appended to.
    pub fn read_schema(&self, table: &TableRef) -> Result<Option<TableSchema>> {
        let path = self.table_dir(table).join(SCHEMA_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path).map_err(|source| WarehouseError::io(&path, source))?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    /// Total rows across all part files of a table, zero if it does not
    /// exist.
    pub fn table_rows(&self, table: &TableRef) -> Result<u64> {
        let dir = self.table_dir(table);
        if !dir.is_dir() {
            return Ok(0);
        }
        count_rows(&part_files(&dir)?)
    }
}

impl Warehouse for FsWarehouse {
    fn append_rows(
        &self,
        table: &TableRef,
        df: &DataFrame,
        schema: &TableSchema,
    ) -> Result<LoadReceipt> {
        let name = table.qualified_name();
        let problems = schema_problems(df, schema);
        if !problems.is_empty() {
            return Err(WarehouseError::schema_mismatch(name, problems));
        }

        let dir = self.table_dir(table);
        fs::create_dir_all(&dir).map_err(|source| WarehouseError::io(&dir, source))?;

        match self.read_schema(table)? {
            Some(existing) if existing.version != schema.version => {
                return Err(WarehouseError::SchemaVersionConflict {
                    table: name,
                    existing: existing.version,
                    expected: schema.version,
                });
            }
            Some(existing) => {
                if existing.columns != schema.columns {
                    return Err(WarehouseError::schema_mismatch(
                        name,
                        vec!["sidecar columns differ from load schema".to_string()],
                    ));
                }
            }
            None => {
                let path = dir.join(SCHEMA_FILE);
                let text = serde_json::to_string_pretty(schema)?;
                fs::write(&path, text).map_err(|source| WarehouseError::io(&path, source))?;
            }
        }

        // The rename inside `write_part` is the last fallible step; an
        // append that returns an error has committed nothing.
        let parts = part_files(&dir)?;
        let existing_rows = count_rows(&parts)?;
        let part_index = parts.len();
        let part_path = dir.join(format!("part-{part_index:05}.csv"));
        write_part(&part_path, df)?;

        let receipt = LoadReceipt {
            table: name,
            appended_rows: df.height(),
            table_rows: existing_rows + df.height() as u64,
        };
        info!(
            table = receipt.table.as_str(),
            part = part_path.display().to_string(),
            appended_rows = receipt.appended_rows,
            table_rows = receipt.table_rows,
            "appended batch"
        );
        Ok(receipt)
    }
}

fn part_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut parts = Vec::new();
    let entries = fs::read_dir(dir).map_err(|source| WarehouseError::io(dir, source))?;
    for entry_result in entries {
        let entry = entry_result.map_err(|source| WarehouseError::io(dir, source))?;
        let path = entry.path();
        let is_part = path.is_file()
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("part-") && name.ends_with(".csv"));
        if is_part {
            parts.push(path);
        }
    }
    parts.sort();
    Ok(parts)
}

fn count_rows(parts: &[PathBuf]) -> Result<u64> {
    let mut total = 0_u64;
    for part in parts {
        let mut reader = csv::Reader::from_path(part)?;
        for record in reader.records() {
            record?;
            total += 1;
        }
    }
    Ok(total)
}

/// Writes the frame under a temporary name and renames it into place after
/// the flush succeeds. The table never holds a partially written part; a
/// failed write removes its temp file and commits nothing.
fn write_part(path: &Path, df: &DataFrame) -> Result<()> {
    let tmp_path = path.with_extension("csv.tmp");
    match write_part_records(&tmp_path, df) {
        Ok(()) => fs::rename(&tmp_path, path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            WarehouseError::io(path, source)
        }),
        Err(error) => {
            let _ = fs::remove_file(&tmp_path);
            Err(error)
        }
    }
}

fn write_part_records(path: &Path, df: &DataFrame) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
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
            record.push(any_to_string(column.get(row).unwrap_or(AnyValue::Null)));
        }
        writer.write_record(&record)?;
    }
    writer
        .flush()
        .map_err(|source| WarehouseError::io(path, source))?;
    Ok(())
}
