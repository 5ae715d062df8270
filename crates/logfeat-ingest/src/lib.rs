//! Log export ingestion.
//!
//! This crate owns the read side of the pipeline:
//!
//! - **store**: the [`ObjectStore`] abstraction plus filesystem and in-memory
//!   backends
//! - **table**: tab-delimited reading into a [`RawTable`] of verbatim cells
//! - **polars_utils**: AnyValue conversions and the canonical text forms for
//!   numeric and temporal cells

pub mod error;
pub mod polars_utils;
pub mod store;
pub mod table;

pub use error::{IngestError, Result, StoreError};
pub use polars_utils::{
    any_to_string, datetime_to_naive, epoch_days_to_date, format_date, format_datetime,
    format_numeric, parse_f64, parse_i64,
};
pub use store::{FsObjectStore, MemoryObjectStore, ObjectMeta, ObjectStore};
pub use table::{RawTable, read_delimited_table, read_tsv_table};
