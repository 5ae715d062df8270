use chrono::NaiveDate;
use polars::prelude::{DataFrame, DataType, TimeUnit};

use logfeat_ingest::RawTable;
use logfeat_transform::{TransformError, engineer_features, table_to_frame};

fn batch_frame(rows: &[[&str; 5]]) -> DataFrame {
    let headers = ["timestamp", "log_level", "service", "message", "user_id"]
        .iter()
        .map(|h| (*h).to_string())
        .collect();
    let rows = rows
        .iter()
        .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
        .collect();
    table_to_frame(&RawTable::new(headers, rows)).expect("build frame")
}

fn scenario_frame() -> DataFrame {
    batch_frame(&[
        ["2026-08-19 10:15:00", "INFO", "svc-a", "hello", "101"],
        ["2026-08-19 11:00:00", "ERROR", "svc-a", "oops", "102"],
        ["2026-08-19 23:45:00", "ERROR", "svc-b", "bad", "103"],
    ])
}

#[test]
fn derives_all_six_features() {
    let df = engineer_features(scenario_frame()).expect("engineer features");

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "timestamp",
            "log_level",
            "service",
            "message",
            "user_id",
            "event_date",
            "hour_of_day",
            "is_error",
            "log_level_encoded",
            "message_length",
            "service_error_rate",
        ]
    );

    assert_eq!(
        df.column("timestamp").unwrap().dtype(),
        &DataType::Datetime(TimeUnit::Microseconds, None)
    );

    let dates: Vec<_> = df
        .column("event_date")
        .unwrap()
        .date()
        .unwrap()
        .as_date_iter()
        .collect();
    let expected = NaiveDate::from_ymd_opt(2026, 8, 19);
    assert_eq!(dates, vec![expected, expected, expected]);

    let hours = df.column("hour_of_day").unwrap().i64().unwrap();
    assert_eq!(hours.get(0), Some(10));
    assert_eq!(hours.get(1), Some(11));
    assert_eq!(hours.get(2), Some(23));

    let is_error = df.column("is_error").unwrap().i64().unwrap();
    assert_eq!(is_error.get(0), Some(0));
    assert_eq!(is_error.get(1), Some(1));
    assert_eq!(is_error.get(2), Some(1));

    let encoded = df.column("log_level_encoded").unwrap().i64().unwrap();
    assert_eq!(encoded.get(0), Some(0));
    assert_eq!(encoded.get(1), Some(2));
    assert_eq!(encoded.get(2), Some(2));

    let lengths = df.column("message_length").unwrap().i64().unwrap();
    assert_eq!(lengths.get(0), Some(5));
    assert_eq!(lengths.get(1), Some(4));
    assert_eq!(lengths.get(2), Some(3));

    let rates = df.column("service_error_rate").unwrap().f64().unwrap();
    assert!((rates.get(0).unwrap() - 0.5).abs() < 1e-12);
    assert!((rates.get(1).unwrap() - 0.5).abs() < 1e-12);
    assert!((rates.get(2).unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn unmapped_levels_encode_as_null_without_failing() {
    let df = engineer_features(batch_frame(&[
        ["2026-08-19 10:15:00", "DEBUG", "svc-a", "x", "1"],
        ["2026-08-19 10:16:00", "error", "svc-a", "y", "2"],
        ["2026-08-19 10:17:00", "ERROR", "svc-a", "z", "3"],
    ]))
    .expect("engineer features");

    let encoded = df.column("log_level_encoded").unwrap().i64().unwrap();
    assert_eq!(encoded.get(0), None);
    assert_eq!(encoded.get(1), None);
    assert_eq!(encoded.get(2), Some(2));

    // Level matching is exact, so lowercase "error" does not count as one.
    let is_error = df.column("is_error").unwrap().i64().unwrap();
    assert_eq!(is_error.get(0), Some(0));
    assert_eq!(is_error.get(1), Some(0));
    assert_eq!(is_error.get(2), Some(1));

    let rates = df.column("service_error_rate").unwrap().f64().unwrap();
    assert!((rates.get(0).unwrap() - (1.0 / 3.0)).abs() < 1e-12);
}

#[test]
fn unparseable_timestamp_aborts_the_batch() {
    let err = engineer_features(batch_frame(&[
        ["2026-08-19 10:15:00", "INFO", "svc-a", "ok", "1"],
        ["not-a-time", "INFO", "svc-a", "bad", "2"],
    ]))
    .expect_err("should abort");
    match err {
        TransformError::Parse { column, row, value } => {
            assert_eq!(column, "timestamp");
            assert_eq!(row, 1);
            assert_eq!(value, "not-a-time");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_timestamp_cell_aborts_the_batch() {
    let err = engineer_features(batch_frame(&[["", "INFO", "svc-a", "ok", "1"]]))
        .expect_err("should abort");
    assert!(matches!(err, TransformError::Parse { row: 0, .. }));
}

#[test]
fn zero_row_batch_derives_empty_columns() {
    let df = engineer_features(batch_frame(&[])).expect("engineer features");
    assert_eq!(df.height(), 0);
    assert_eq!(df.width(), 11);
}

#[test]
fn extra_columns_ride_through_untouched() {
    let headers = vec![
        "timestamp".to_string(),
        "log_level".to_string(),
        "service".to_string(),
        "message".to_string(),
        "user_id".to_string(),
        "region".to_string(),
    ];
    let rows = vec![vec![
        "2026-08-19 10:15:00".to_string(),
        "INFO".to_string(),
        "svc-a".to_string(),
        "hello".to_string(),
        "101".to_string(),
        "eu-west".to_string(),
    ]];
    let frame = table_to_frame(&RawTable::new(headers, rows)).expect("build frame");

    let df = engineer_features(frame).expect("engineer features");
    assert_eq!(df.width(), 12);
    let region = df.column("region").unwrap().str().unwrap();
    assert_eq!(region.get(0), Some("eu-west"));
}

#[test]
fn empty_service_labels_form_their_own_group() {
    let df = engineer_features(batch_frame(&[
        ["2026-08-19 10:15:00", "ERROR", "", "a", "1"],
        ["2026-08-19 10:16:00", "INFO", "", "b", "2"],
        ["2026-08-19 10:17:00", "INFO", "svc-a", "c", "3"],
    ]))
    .expect("engineer features");

    let rates = df.column("service_error_rate").unwrap().f64().unwrap();
    assert!((rates.get(0).unwrap() - 0.5).abs() < 1e-12);
    assert!((rates.get(1).unwrap() - 0.5).abs() < 1e-12);
    assert!((rates.get(2).unwrap() - 0.0).abs() < 1e-12);
}

#[test]
fn message_length_counts_characters_not_bytes() {
    let df = engineer_features(batch_frame(&[[
        "2026-08-19 10:15:00",
        "INFO",
        "svc-a",
        "héllo wörld",
        "1",
    ]]))
    .expect("engineer features");

    let lengths = df.column("message_length").unwrap().i64().unwrap();
    assert_eq!(lengths.get(0), Some(11));
}
