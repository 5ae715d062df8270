//! The warehouse interface and its in-memory backend.

use std::collections::BTreeMap;
use std::sync::Mutex;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::info;

use logfeat_model::{TableRef, TableSchema};

use crate::check::schema_problems;
use crate::error::{Result, WarehouseError};

/// What an append actually did, reported back to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReceipt {
    /// Fully qualified destination table.
    pub table: String,
    /// Rows appended by this load.
    pub appended_rows: usize,
    /// Total rows in the table after the append.
    pub table_rows: u64,
}

/// Append-only interface to the destination warehouse.
///
/// Implementations create the table on first append and must refuse frames
/// that do not match the table schema, so a load can never leave the table
/// half-written or mistyped.
pub trait Warehouse {
    /// Appends the frame to `table`, creating the table under `schema` if it
    /// does not exist yet.
    fn append_rows(
        &self,
        table: &TableRef,
        df: &DataFrame,
        schema: &TableSchema,
    ) -> Result<LoadReceipt>;
}

#[derive(Debug, Default)]
struct MemoryTable {
    schema_version: u32,
    batches: Vec<DataFrame>,
}

impl MemoryTable {
    fn total_rows(&self) -> u64 {
        self.batches.iter().map(|df| df.height() as u64).sum()
    }
}

/// In-memory warehouse for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryWarehouse {
    tables: Mutex<BTreeMap<String, MemoryTable>>,
}

impl MemoryWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total rows currently held by a table, zero if it does not exist.
    pub fn table_rows(&self, table: &TableRef) -> u64 {
        let tables = self.tables.lock().unwrap_or_else(|poison| poison.into_inner());
        tables
            .get(&table.qualified_name())
            .map_or(0, MemoryTable::total_rows)
    }

    /// Batches appended to a table so far, in append order.
    pub fn batches(&self, table: &TableRef) -> Vec<DataFrame> {
        let tables = self.tables.lock().unwrap_or_else(|poison| poison.into_inner());
        tables
            .get(&table.qualified_name())
            .map(|t| t.batches.clone())
            .unwrap_or_default()
    }
}

impl Warehouse for MemoryWarehouse {
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

        let mut tables = self.tables.lock().unwrap_or_else(|poison| poison.into_inner());
        let entry = tables.entry(name.clone()).or_insert_with(|| MemoryTable {
            schema_version: schema.version,
            batches: Vec::new(),
        });
        if entry.schema_version != schema.version {
            return Err(WarehouseError::SchemaVersionConflict {
                table: name,
                existing: entry.schema_version,
                expected: schema.version,
            });
        }
        entry.batches.push(df.clone());

        let receipt = LoadReceipt {
            table: name,
            appended_rows: df.height(),
            table_rows: entry.total_rows(),
        };
        info!(
            table = receipt.table.as_str(),
            appended_rows = receipt.appended_rows,
            table_rows = receipt.table_rows,
            "appended batch"
        );
        Ok(receipt)
    }
}
