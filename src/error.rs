//! Error types for the report cleaner.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cleaner operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that abort (or, under collect-and-report, reject) part of a run.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Failed to read the input or write the output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    /// Input path does not exist
    #[error("Input file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    /// Header row lacks one of the required columns
    #[error("Header at line {line} has no '{column}' column")]
    MalformedHeader { line: usize, column: &'static str },

    /// A data row arrived before any header row
    #[error("Data row at line {line} precedes the header row")]
    MissingHeader { line: usize },

    /// A designated field could not be converted
    #[error("Invalid '{column}' value at line {line}: {source} (row: {row})")]
    FieldParse {
        line: usize,
        column: &'static str,
        row: String,
        #[source]
        source: FieldError,
    },
}

/// Field-level conversion failure, without row context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Account value is not an integer
    #[error("'{0}' is not an integer")]
    NotAnInteger(String),

    /// Account integer too large to express as a floating-point number
    #[error("'{0}' is too large to format")]
    OutOfRange(String),

    /// Data row is shorter than the header positions require
    #[error("row has no field at position {0}")]
    MissingField(usize),

    /// Amount does not form a number after sign repositioning
    #[error("'{raw}' does not form a number (got '{formatted}')")]
    InvalidAmount { raw: String, formatted: String },
}

impl ParseError {
    /// Returns `true` for errors tied to a single data row.
    ///
    /// Only these may be skipped under [`ErrorPolicy::CollectAndReport`].
    ///
    /// [`ErrorPolicy::CollectAndReport`]: crate::config::ErrorPolicy::CollectAndReport
    pub fn is_row_error(&self) -> bool {
        matches!(self, ParseError::FieldParse { .. })
    }
}
