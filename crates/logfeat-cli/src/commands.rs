use std::fs;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info;

use logfeat_cli::pipeline::{RunOutcome, run_pipeline};
use logfeat_ingest::{FsObjectStore, ObjectStore};
use logfeat_model::{PipelineConfig, TableRef, TableSchema};
use logfeat_warehouse::FsWarehouse;

use crate::cli::{ObjectsArgs, RunArgs};
use crate::summary::apply_table_style;

pub fn run_batch(args: &RunArgs) -> Result<RunOutcome> {
    let destination: TableRef = args.table.parse()?;
    let config = PipelineConfig::new(args.bucket.clone(), args.object.clone(), destination)
        .with_dry_run(args.dry_run);
    let store = FsObjectStore::new(&args.store_root);
    let warehouse = FsWarehouse::new(&args.warehouse_root);
    let outcome = run_pipeline(&store, &warehouse, &config)?;

    if let Some(path) = &args.report_file {
        let json = serde_json::to_string_pretty(&outcome.report).context("serialize run report")?;
        fs::write(path, json).with_context(|| format!("write run report {}", path.display()))?;
        info!(path = %path.display(), "run report written");
    }
    Ok(outcome)
}

pub fn run_objects(args: &ObjectsArgs) -> Result<()> {
    let store = FsObjectStore::new(&args.store_root);
    let objects = store.list_objects(&args.bucket, &args.prefix)?;
    let mut table = Table::new();
    table.set_header(vec!["Key", "Bytes"]);
    apply_table_style(&mut table);
    for meta in objects {
        table.add_row(vec![meta.key, meta.size.to_string()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_schema() {
    let schema = TableSchema::enriched();
    println!("Schema version: {}", schema.version);
    let mut table = Table::new();
    table.set_header(vec!["Column", "Type", "Nullable"]);
    apply_table_style(&mut table);
    for spec in schema.columns {
        table.add_row(vec![
            spec.name,
            spec.column_type.to_string(),
            if spec.nullable { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{table}");
}
