//! Required-column validation.

use tracing::debug;

use logfeat_ingest::RawTable;
use logfeat_model::REQUIRED_COLUMNS;

use crate::error::{Result, TransformError};

/// Checks that every required column is present after normalization.
///
/// The error lists all missing columns at once, in contract order, together
/// with the columns the batch actually carried.
pub fn validate_required_columns(table: &RawTable) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| table.column_index(required).is_none())
        .map(|required| (*required).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(TransformError::schema(missing, table.headers.clone()));
    }
    debug!(columns = table.width(), rows = table.height(), "schema validated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(headers: &[&str]) -> RawTable {
        RawTable::new(headers.iter().map(|h| (*h).to_string()).collect(), vec![])
    }

    #[test]
    fn accepts_full_schema() {
        let table = table_with(&["timestamp", "log_level", "service", "message", "user_id"]);
        assert!(validate_required_columns(&table).is_ok());
    }

    #[test]
    fn accepts_extra_columns() {
        let table = table_with(&[
            "timestamp", "log_level", "service", "message", "user_id", "region",
        ]);
        assert!(validate_required_columns(&table).is_ok());
    }

    #[test]
    fn reports_all_missing_columns_in_contract_order() {
        let table = table_with(&["service", "message"]);
        let err = validate_required_columns(&table).expect_err("schema should fail");
        match err {
            TransformError::Schema { missing, found } => {
                assert_eq!(missing, vec!["timestamp", "log_level", "user_id"]);
                assert_eq!(found, vec!["service", "message"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_table_is_missing_everything() {
        let err = validate_required_columns(&RawTable::default()).expect_err("schema should fail");
        match err {
            TransformError::Schema { missing, found } => {
                assert_eq!(missing.len(), 5);
                assert!(found.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
