//! Header canonicalization.
//!
//! Upstream log exporters disagree on header casing and padding, so every
//! batch passes through here before schema validation. Only header labels are
//! touched; cell values flow through untouched.

use logfeat_ingest::RawTable;

/// Canonicalizes one header label: surrounding whitespace and any stray BOM
/// are stripped, then the label is lowercased. Internal whitespace stays.
/// U+FEFF is not `White_Space`, so the edges are trimmed in a single pass
/// that accepts both.
pub fn normalize_label(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_lowercase()
}

/// Canonicalizes every header of a raw table. No error possible: any header
/// content maps to some canonical label, and rows are carried as-is.
pub fn normalize_schema(table: RawTable) -> RawTable {
    let headers = table
        .headers
        .iter()
        .map(|header| normalize_label(header))
        .collect();
    RawTable {
        headers,
        rows: table.rows,
    }
}
