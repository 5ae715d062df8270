pub mod config;
pub mod level;
pub mod report;
pub mod schema;

pub use config::{InvalidTableRef, PipelineConfig, TableRef};
pub use level::LogLevel;
pub use report::{RunReport, StageReport};
pub use schema::{
    COL_EVENT_DATE, COL_HOUR_OF_DAY, COL_IS_ERROR, COL_LOG_LEVEL, COL_LOG_LEVEL_ENCODED,
    COL_MESSAGE, COL_MESSAGE_LENGTH, COL_SERVICE, COL_SERVICE_ERROR_RATE, COL_TIMESTAMP,
    COL_USER_ID, ColumnSpec, ColumnType, REQUIRED_COLUMNS, SCHEMA_VERSION, TableSchema,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_and_levels_agree_on_encoded_column() {
        let schema = TableSchema::enriched();
        let spec = schema.column(COL_LOG_LEVEL_ENCODED).expect("encoded column");
        assert_eq!(spec.column_type, ColumnType::Int);
        assert!(spec.nullable);
        assert_eq!(LogLevel::Error.encode(), 2);
    }

    #[test]
    fn config_serializes() {
        let config = PipelineConfig::new(
            "ops-logs",
            "2026/08/logs.tsv",
            TableRef::new("analytics", "logs", "enriched_log_features"),
        );
        let json = serde_json::to_string(&config).expect("serialize config");
        let round: PipelineConfig = serde_json::from_str(&json).expect("deserialize config");
        assert_eq!(round, config);
    }
}
