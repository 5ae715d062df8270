use logfeat_ingest::read_tsv_table;
use logfeat_transform::{TransformError, normalize_schema, validate_required_columns};

#[test]
fn mixed_case_padded_headers_validate_after_normalization() {
    let payload = b"Timestamp\t Log_Level \tservice\tmessage\tuser_id\n\
                    2026-08-19 10:15:00\tINFO\tauth\thello\t101\n";
    let table = read_tsv_table(payload).expect("read table");
    assert_eq!(table.headers[0], "Timestamp");
    assert_eq!(table.headers[1], " Log_Level ");

    let normalized = normalize_schema(table);
    assert_eq!(
        normalized.headers,
        vec!["timestamp", "log_level", "service", "message", "user_id"]
    );
    assert!(validate_required_columns(&normalized).is_ok());
    assert_eq!(normalized.rows[0][4], "101");
}

#[test]
fn missing_required_column_fails_before_any_derivation() {
    let payload = b"Timestamp\tLog_Level\tService\tMessage\n\
                    2026-08-19 10:15:00\tINFO\tauth\thello\n";
    let normalized = normalize_schema(read_tsv_table(payload).expect("read table"));
    let err = validate_required_columns(&normalized).expect_err("should fail");
    insta::assert_snapshot!(
        err.to_string(),
        @"missing required columns: user_id; found columns: timestamp, log_level, service, message"
    );
}

#[test]
fn empty_object_fails_validation_with_nothing_found() {
    let normalized = normalize_schema(read_tsv_table(b"").expect("read table"));
    let err = validate_required_columns(&normalized).expect_err("should fail");
    match err {
        TransformError::Schema { missing, found } => {
            assert_eq!(missing.len(), 5);
            assert!(found.is_empty());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn normalization_does_not_touch_cell_values() {
    let payload = b"Message\tService\n  Padded Message  \tAuth\n";
    let normalized = normalize_schema(read_tsv_table(payload).expect("read table"));
    assert_eq!(normalized.headers, vec!["message", "service"]);
    assert_eq!(normalized.rows[0][0], "  Padded Message  ");
    assert_eq!(normalized.rows[0][1], "Auth");
}
