//! Log record transformation.
//!
//! This crate carries a batch from raw text to a typed, schema-conformant
//! frame:
//!
//! - **normalize**: header canonicalization (trim + lowercase)
//! - **validate**: required-column checking against the contract
//! - **frame**: all-text DataFrame construction from a raw table
//! - **datetime**: log timestamp parsing onto naive UTC
//! - **features**: derivation of the six analytic columns
//! - **handoff**: serialization to the delimited stage boundary
//! - **coerce**: strict re-typing of the hand-off against the table schema

pub mod coerce;
pub mod datetime;
pub mod error;
pub mod features;
pub mod frame;
pub mod handoff;
pub mod normalize;
pub mod validate;

pub use coerce::coerce_handoff;
pub use datetime::{parse_date, parse_timestamp};
pub use error::{Result, TransformError};
pub use features::engineer_features;
pub use frame::table_to_frame;
pub use handoff::handoff_to_csv;
pub use normalize::{normalize_label, normalize_schema};
pub use validate::validate_required_columns;
