//! Warehouse loading for coerced log batches.
//!
//! A [`Warehouse`] appends typed frames to a destination table after a
//! frame-level schema check. [`FsWarehouse`] persists tables as directories
//! of CSV part files with a `schema.json` sidecar; [`MemoryWarehouse`] keeps
//! batches in memory for tests and dry runs.

pub mod check;
pub mod client;
pub mod error;
pub mod fs;

pub use check::{expected_dtype, schema_problems};
pub use client::{LoadReceipt, MemoryWarehouse, Warehouse};
pub use error::{Result, WarehouseError};
pub use fs::FsWarehouse;
