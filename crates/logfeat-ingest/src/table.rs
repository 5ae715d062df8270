//! Raw delimited table reading.

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::Result;

/// Delimiter used by the log export format.
pub const TAB: u8 = b'\t';

/// A delimited table exactly as read: header labels verbatim, cells verbatim.
///
/// Header canonicalization happens downstream. Cell values keep their exact
/// characters so text-derived features count what the producer wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows, excluding the header.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Index of the first column with the exact label.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

/// Reads a tab-delimited log export. The first record is the header row; data
/// rows are padded with empty cells or truncated to the header width.
pub fn read_tsv_table(bytes: &[u8]) -> Result<RawTable> {
    read_delimited_table(bytes, TAB)
}

/// Reads a delimited table with an explicit delimiter byte. The payload must
/// be UTF-8 text.
pub fn read_delimited_table(bytes: &[u8], delimiter: u8) -> Result<RawTable> {
    std::str::from_utf8(bytes)?;
    let payload = strip_bom(bytes);
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(payload);
    let mut records = reader.records();
    let Some(first) = records.next() else {
        return Ok(RawTable::default());
    };
    let headers: Vec<String> = first?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            row.push(record.get(idx).unwrap_or("").to_string());
        }
        rows.push(row);
    }
    debug!(columns = headers.len(), rows = rows.len(), "read delimited table");
    Ok(RawTable { headers, rows })
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_rows() {
        let payload = b"timestamp\tlog_level\tservice\n2026-08-19 10:00:00\tINFO\tauth\n";
        let table = read_tsv_table(payload).expect("read table");
        assert_eq!(table.headers, vec!["timestamp", "log_level", "service"]);
        assert_eq!(table.height(), 1);
        assert_eq!(table.rows[0], vec!["2026-08-19 10:00:00", "INFO", "auth"]);
    }

    #[test]
    fn keeps_cell_whitespace_verbatim() {
        let payload = b"message\tservice\n  padded  \tauth\n";
        let table = read_tsv_table(payload).expect("read table");
        assert_eq!(table.rows[0][0], "  padded  ");
    }

    #[test]
    fn pads_short_rows_and_truncates_long_rows() {
        let payload = b"a\tb\tc\n1\t2\n1\t2\t3\t4\n";
        let table = read_tsv_table(payload).expect("read table");
        assert_eq!(table.rows[0], vec!["1", "2", ""]);
        assert_eq!(table.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn strips_leading_bom_from_first_header() {
        let payload = b"\xef\xbb\xbftimestamp\tservice\n";
        let table = read_tsv_table(payload).expect("read table");
        assert_eq!(table.headers, vec!["timestamp", "service"]);
    }

    #[test]
    fn empty_payload_reads_as_empty_table() {
        let table = read_tsv_table(b"").expect("read table");
        assert!(table.headers.is_empty());
        assert_eq!(table.height(), 0);
    }

    #[test]
    fn rejects_non_utf8_payload() {
        let err = read_tsv_table(b"timestamp\tservice\n\xff\xfe\tauth\n").unwrap_err();
        assert!(matches!(err, crate::IngestError::Decode(_)));
    }

    #[test]
    fn header_only_payload_has_zero_rows() {
        let payload = b"timestamp\tlog_level\tservice\tmessage\tuser_id\n";
        let table = read_tsv_table(payload).expect("read table");
        assert_eq!(table.width(), 5);
        assert_eq!(table.height(), 0);
    }
}
