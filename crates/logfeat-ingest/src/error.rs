//! Error types for object store access and table reading.

use thiserror::Error;

/// Errors raised by object store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The bucket does not exist.
    #[error("bucket not found: {bucket}")]
    BucketNotFound { bucket: String },

    /// The bucket exists but holds no object under the key.
    #[error("object not found: {bucket}/{key}")]
    ObjectNotFound { bucket: String, key: String },

    /// Reading an object failed mid-fetch.
    #[error("read {bucket}/{key}: {source}")]
    Read {
        bucket: String,
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Enumerating a bucket failed.
    #[error("list bucket {bucket}: {source}")]
    List {
        bucket: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Create a BucketNotFound error.
    pub fn bucket_not_found(bucket: impl Into<String>) -> Self {
        Self::BucketNotFound {
            bucket: bucket.into(),
        }
    }

    /// Create an ObjectNotFound error.
    pub fn object_not_found(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self::ObjectNotFound {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

/// Errors raised while turning a fetched object into a raw table.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Object store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The fetched bytes are not UTF-8 text.
    #[error("object payload is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),

    /// The payload is not a well-formed delimited file.
    #[error("malformed delimited payload: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::object_not_found("ops-logs", "2026/08/logs.tsv");
        assert_eq!(format!("{err}"), "object not found: ops-logs/2026/08/logs.tsv");

        let err = StoreError::bucket_not_found("missing");
        assert_eq!(format!("{err}"), "bucket not found: missing");
    }

    #[test]
    fn test_store_error_conversion() {
        let err: IngestError = StoreError::bucket_not_found("missing").into();
        assert!(matches!(err, IngestError::Store(_)));
    }
}
