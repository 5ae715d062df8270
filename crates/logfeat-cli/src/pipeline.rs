//! Batch pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Fetch**: read the log export object from the store
//! 2. **Parse**: decode the tab-delimited bytes into a raw table
//! 3. **Normalize**: canonicalize column labels
//! 4. **Validate**: require the five raw log columns
//! 5. **Engineer**: parse timestamps and derive the six feature columns
//! 6. **Handoff**: serialize the enriched frame to the CSV transfer form
//! 7. **Coerce**: re-establish the typed schema from the transfer text
//! 8. **Load**: append the typed frame to the destination table
//!
//! Stages run strictly in order and any failure aborts the run before the
//! load; a dry run stops after coercion. Each stage runs inside its own
//! `info_span!` and reports rows and elapsed time into the [`RunReport`].

use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info, info_span, warn};

use logfeat_ingest::{ObjectStore, read_tsv_table};
use logfeat_model::{PipelineConfig, RunReport, StageReport, TableSchema};
use logfeat_transform::{
    coerce_handoff, engineer_features, handoff_to_csv, normalize_schema, table_to_frame,
    validate_required_columns,
};
use logfeat_warehouse::{LoadReceipt, Warehouse};

/// Everything a finished run hands back to the caller.
#[derive(Debug)]
pub struct RunOutcome {
    /// Per-stage rows and timings, serializable as the run report.
    pub report: RunReport,
    /// Load receipt, absent on dry runs.
    pub receipt: Option<LoadReceipt>,
}

/// Runs the full fetch-to-load pipeline for one log export batch.
pub fn run_pipeline(
    store: &dyn ObjectStore,
    warehouse: &dyn Warehouse,
    config: &PipelineConfig,
) -> Result<RunOutcome> {
    let schema = TableSchema::enriched();
    let destination = config.destination.qualified_name();
    let run_span = info_span!("run", bucket = %config.bucket, object = %config.object);
    let _run_guard = run_span.enter();
    let mut stages = Vec::new();

    // =========================================================================
    // Stage 1: Fetch - read the export object from the store
    // =========================================================================
    let fetch_start = Instant::now();
    let bytes = info_span!("fetch").in_scope(|| {
        log_bucket_listing(store, &config.bucket);
        store.fetch_object(&config.bucket, &config.object)
    })?;
    let fetch_ms = elapsed_ms(fetch_start);
    info!(
        bucket = %config.bucket,
        object = %config.object,
        bytes = bytes.len(),
        duration_ms = fetch_ms,
        "fetch complete"
    );
    stages.push(StageReport::new("fetch", None, fetch_ms));

    // =========================================================================
    // Stage 2: Parse - tab-delimited bytes to a raw table of verbatim cells
    // =========================================================================
    let parse_start = Instant::now();
    let raw = info_span!("parse").in_scope(|| read_tsv_table(&bytes))?;
    let input_rows = raw.height();
    let parse_ms = elapsed_ms(parse_start);
    info!(
        rows = input_rows,
        columns = raw.width(),
        duration_ms = parse_ms,
        "parse complete"
    );
    stages.push(StageReport::new("parse", Some(input_rows), parse_ms));

    // =========================================================================
    // Stage 3-4: Normalize labels, then require the raw log columns
    // =========================================================================
    let normalize_start = Instant::now();
    let raw = info_span!("normalize").in_scope(|| normalize_schema(raw));
    debug!(columns = ?raw.headers, "normalized columns");
    stages.push(StageReport::new(
        "normalize",
        Some(raw.height()),
        elapsed_ms(normalize_start),
    ));

    let validate_start = Instant::now();
    info_span!("validate").in_scope(|| validate_required_columns(&raw))?;
    stages.push(StageReport::new(
        "validate",
        Some(raw.height()),
        elapsed_ms(validate_start),
    ));

    // =========================================================================
    // Stage 5: Engineer - typed timestamps plus the six derived columns
    // =========================================================================
    let engineer_start = Instant::now();
    let enriched = info_span!("engineer").in_scope(|| {
        let frame = table_to_frame(&raw)?;
        engineer_features(frame)
    })?;
    let engineer_ms = elapsed_ms(engineer_start);
    info!(
        rows = enriched.height(),
        columns = enriched.width(),
        duration_ms = engineer_ms,
        "feature engineering complete"
    );
    stages.push(StageReport::new(
        "engineer",
        Some(enriched.height()),
        engineer_ms,
    ));

    // =========================================================================
    // Stage 6: Handoff - serialize to the transfer representation
    // =========================================================================
    let handoff_start = Instant::now();
    let payload = info_span!("handoff").in_scope(|| handoff_to_csv(&enriched))?;
    debug!(bytes = payload.len(), "hand-off serialized");
    stages.push(StageReport::new(
        "handoff",
        Some(enriched.height()),
        elapsed_ms(handoff_start),
    ));

    // =========================================================================
    // Stage 7: Coerce - re-establish the load schema from the transfer text
    // =========================================================================
    let coerce_start = Instant::now();
    let typed = info_span!("coerce").in_scope(|| coerce_handoff(&payload, &schema))?;
    let coerce_ms = elapsed_ms(coerce_start);
    info!(rows = typed.height(), duration_ms = coerce_ms, "coercion complete");
    stages.push(StageReport::new("coerce", Some(typed.height()), coerce_ms));

    // =========================================================================
    // Stage 8: Load - append to the destination table
    // =========================================================================
    let receipt = if config.dry_run {
        info!(
            table = destination.as_str(),
            rows = typed.height(),
            "dry run, skipping load"
        );
        None
    } else {
        let load_start = Instant::now();
        let receipt = info_span!("load", table = %destination)
            .in_scope(|| warehouse.append_rows(&config.destination, &typed, &schema))?;
        let load_ms = elapsed_ms(load_start);
        info!(
            table = receipt.table.as_str(),
            rows = receipt.appended_rows,
            table_rows = receipt.table_rows,
            duration_ms = load_ms,
            "load complete"
        );
        stages.push(StageReport::new("load", Some(receipt.appended_rows), load_ms));
        Some(receipt)
    };

    let report = RunReport {
        bucket: config.bucket.clone(),
        object: config.object.clone(),
        destination,
        schema_version: schema.version,
        input_rows,
        loaded_rows: receipt.as_ref().map(|receipt| receipt.appended_rows),
        dry_run: config.dry_run,
        stages,
    };
    info!(
        input_rows = report.input_rows,
        loaded_rows = report.loaded_rows,
        total_duration_ms = report.total_duration_ms(),
        "run complete"
    );
    Ok(RunOutcome { report, receipt })
}

/// Best-effort bucket listing, logged for observability. Names only; the
/// listing never feeds the transform.
fn log_bucket_listing(store: &dyn ObjectStore, bucket: &str) {
    match store.list_objects(bucket, "") {
        Ok(objects) => {
            let keys: Vec<&str> = objects.iter().map(|meta| meta.key.as_str()).collect();
            debug!(bucket, object_count = keys.len(), objects = ?keys, "bucket listing");
        }
        Err(error) => warn!(bucket, %error, "bucket listing failed"),
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
