//! Error taxonomy shared by every tablekit operation

use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure cases that can occur while loading, reconciling, converting,
/// searching, or generating tabular data.
#[derive(Debug, Error)]
pub enum Error {
    /// The file extension is neither CSV nor a recognized spreadsheet format.
    #[error("unsupported file format: '{extension}' (use .csv, .xls, or .xlsx)")]
    UnsupportedFormat { extension: String },

    /// The designated key column does not exist in a table.
    #[error("key column '{column}' not found in {table}")]
    KeyColumnMissing { column: String, table: String },

    /// The user declined a prompt or gave an unrecognized answer.
    #[error("operation canceled: {0}")]
    OperationCanceled(String),

    /// Wrapper for disk I/O failures.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the CSV reader/writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the spreadsheet reader.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::Error),

    /// Errors bubbled up from the spreadsheet writer.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// A drive search completed without any match.
    #[error("no files named '{0}' found on any volume")]
    NoFilesFound(String),

    /// A path failed filename validation.
    #[error("invalid filename '{path}': {reason}")]
    InvalidFilename { path: PathBuf, reason: String },

    /// A converted file did not read back identical to its source.
    #[error("data integrity check failed: '{0}' does not match the original after conversion")]
    IntegrityCheckFailed(PathBuf),
}

impl Error {
    pub(crate) fn key_column_missing(column: &str, table: impl Into<String>) -> Self {
        Error::KeyColumnMissing {
            column: column.to_string(),
            table: table.into(),
        }
    }

    pub(crate) fn invalid_filename(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::InvalidFilename {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
