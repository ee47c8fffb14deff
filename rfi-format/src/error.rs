//! Error types for RFI

use std::path::{Path, PathBuf};
use thiserror::Error;

/// RFI error types
#[derive(Debug, Error)]
pub enum RfiError {
    /// Reading or writing the source file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path of the file being read or written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// Another run currently holds the lock for this file.
    #[error(
        "{} is locked by another run (remove {} if no run is active)",
        path.display(),
        lock_path.display()
    )]
    Locked {
        /// Path of the file being transformed
        path: PathBuf,
        /// Path of the lock file that already exists
        lock_path: PathBuf,
    },
    /// Input contains no record literals at all.
    #[error("No record literals found in input")]
    NoRecords,
    /// Records were found, but none of them carries the anchor field.
    #[error("No record contains anchor field '{anchor}' ({records} records scanned)")]
    AnchorNotFound {
        /// Anchor field name that was searched for
        anchor: String,
        /// Number of records that were scanned
        records: usize,
    },
    /// A string, comment, or bracketed construct runs to end of input.
    #[error("Unterminated {construct} starting at line {line}, column {column}")]
    Unterminated {
        /// Kind of construct that was left open
        construct: &'static str,
        /// 1-based line of the opening delimiter
        line: usize,
        /// 1-based column of the opening delimiter
        column: usize,
    },
    /// A closing bracket does not match the innermost open bracket.
    #[error("Mismatched '{found}' at line {line}, column {column} (expected '{expected}')")]
    Mismatched {
        /// Closing delimiter that was expected
        expected: char,
        /// Closing delimiter that was found
        found: char,
        /// 1-based line of the offending delimiter
        line: usize,
        /// 1-based column of the offending delimiter
        column: usize,
    },
    /// Injected field name is not a plain identifier.
    #[error("Invalid field name: '{0}'")]
    InvalidFieldName(String),
    /// Raw literal for an injected field is not a single balanced value.
    #[error("Invalid literal for field '{name}': {reason}")]
    InvalidLiteral {
        /// Field the literal belongs to
        name: String,
        /// Why the literal was rejected
        reason: String,
    },
    /// A `NAME=VALUE` field spec or a transform plan is malformed.
    #[error("Invalid field spec: {0}")]
    InvalidFieldSpec(String),
    /// Some records lack the anchor field and partial matches are not allowed.
    #[error("{skipped} record(s) lack anchor field '{anchor}'")]
    PartialMatch {
        /// Anchor field name
        anchor: String,
        /// Number of records skipped
        skipped: usize,
    },
    /// A configured limit was exceeded.
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),
    /// Configuration file could not be loaded.
    #[error("Config error: {0}")]
    Config(String),
}

impl RfiError {
    /// Wrap an I/O error together with the path it occurred on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        RfiError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether this error means the input is not in the expected shape
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            RfiError::NoRecords
                | RfiError::AnchorNotFound { .. }
                | RfiError::Unterminated { .. }
                | RfiError::Mismatched { .. }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, RfiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_mentions_path() {
        let err = RfiError::io(
            "src/data/personalities.ts",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let message = err.to_string();
        assert!(message.contains("src/data/personalities.ts"));
        assert!(message.contains("missing"));
        assert!(!err.is_format_error());
    }

    #[test]
    fn shape_errors_are_format_errors() {
        assert!(RfiError::NoRecords.is_format_error());
        assert!(RfiError::AnchorNotFound {
            anchor: "achievements".into(),
            records: 3
        }
        .is_format_error());
        assert!(!RfiError::InvalidFieldName("1x".into()).is_format_error());
    }
}
