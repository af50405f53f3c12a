//! Error types for the data-loader crate.
//!
//! Every failure at the catalog boundary is reported as a [`DataLoadError`].
//! The recommendation core never sees a half-parsed catalog: either the
//! whole file loads and validates, or loading fails with one of these.

use thiserror::Error;

/// Errors that can occur while reading and validating a movie catalog
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader itself failed (bad quoting, invalid UTF-8, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row in the catalog couldn't be deserialized
    ///
    /// `line` is the 1-based line number reported by the CSV reader
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// A field had a value the catalog cannot accept
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Catalog-wide invariant failed (e.g. non-contiguous indices)
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
