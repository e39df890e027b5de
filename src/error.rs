//! Error types for sweep-db
//!
//! Every storage failure is an explicit variant: callers match on it,
//! nothing is swallowed as a silent no-op.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// sweep-db error types
#[derive(Error, Debug)]
pub enum Error {
    /// Metadata insert for a `file_name` that is already stored
    #[error("Duplicate key: experiment with file_name '{file_name}' already exists")]
    DuplicateKey {
        /// Offending natural key
        file_name: String,
    },

    /// Measurement insert against an experiment id with no metadata row
    #[error("Reference error: experiment_id {experiment_id} does not exist in experiment_info")]
    ReferenceError {
        /// Unknown experiment id
        experiment_id: i64,
    },

    /// Input table lacks required measurement fields
    #[error("Schema mismatch: missing required fields {missing:?}\nExpected at least: frequency, x1, y1, x2, y2")]
    SchemaMismatch {
        /// Names of the fields that could not be resolved
        missing: Vec<String>,
    },

    /// Lookup, update or delete against an unknown `file_name`
    #[error("Not found: no experiment with file_name '{file_name}'")]
    NotFound {
        /// Requested natural key
        file_name: String,
    },

    /// File name does not follow `<prefix>_<timestamp>.<ext>`
    #[error("Invalid file name '{0}': expected <prefix>_<timestamp>.<ext>")]
    InvalidFileName(String),

    /// Empty prefix or timestamp key
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Measurement file content could not be parsed
    #[error("Parse error in {source_name} (line {line}): {message}")]
    Parse {
        /// File (or stream label) being parsed
        source_name: String,
        /// 1-based line number
        line: u64,
        /// What went wrong
        message: String,
    },

    /// Log-domain view requested over a table containing `fre <= 0`
    #[error("Frequency column contains non-positive value {value} at row {row}; log transform is undefined")]
    NonPositiveFrequency {
        /// Zero-based row index of the first offending value
        row: usize,
        /// Offending value
        value: f64,
    },

    /// Measurement value is NaN or infinite and cannot be stored
    #[error("Non-finite value {value} in column {column} at row {row}")]
    NonFiniteValue {
        /// Zero-based row index within the written rows
        row: usize,
        /// Column name (`fre`, `X1`, ...)
        column: String,
        /// Offending value
        value: f64,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `SQLite` error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Delimited-text reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// True for the "unknown `file_name`" condition.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
