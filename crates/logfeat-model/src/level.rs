//! Log severity levels and their ordinal encoding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three severities the feature engine maps to ordinals.
///
/// Matching is exact and case-sensitive: `"error"` or `"Err"` are not
/// recognized and encode as null downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parses an exact upper-case level label. Anything else is unmapped.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "INFO" => Some(LogLevel::Info),
            "WARN" => Some(LogLevel::Warn),
            "ERROR" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// Ordinal code carried in the `log_level_encoded` column.
    pub fn encode(self) -> i64 {
        match self {
            LogLevel::Info => 0,
            LogLevel::Warn => 1,
            LogLevel::Error => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_labels_only() {
        assert_eq!(LogLevel::parse("INFO"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("WARN"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("ERROR"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("error"), None);
        assert_eq!(LogLevel::parse("WARNING"), None);
        assert_eq!(LogLevel::parse(""), None);
    }

    #[test]
    fn encoding_is_ordinal() {
        assert_eq!(LogLevel::Info.encode(), 0);
        assert_eq!(LogLevel::Warn.encode(), 1);
        assert_eq!(LogLevel::Error.encode(), 2);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for level in [LogLevel::Info, LogLevel::Warn, LogLevel::Error] {
            assert_eq!(LogLevel::parse(&level.to_string()), Some(level));
        }
    }
}
