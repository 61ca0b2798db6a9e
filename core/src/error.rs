//! Error types for the label generation pipeline.
//!
//! This module defines one error type per stage:
//!
//! - [`CsvError`] - CSV decoding and parsing errors
//! - [`ValidationError`] - Structural problems with an uploaded batch
//! - [`BarcodeError`] - Tracking values that cannot be encoded
//! - [`DocumentError`] - Document assembly and export errors
//! - [`SessionError`] - Top-level errors surfaced to the UI or CLI
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Row-level problems (duplicate tracking, blank fields) are *not* errors:
//! they are advisory flags carried by [`crate::models::RecordFlags`].

use thiserror::Error;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors during CSV parsing.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode the file contents.
    #[error("Failed to decode content as {encoding}: {message}")]
    Encoding { encoding: String, message: String },

    /// Malformed CSV data.
    #[error("Line {line}: {message}")]
    ParseError { line: u64, message: String },

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,

    /// Upload exceeds the accepted size.
    #[error("File is {size} bytes, the limit is {limit}")]
    TooLarge { size: usize, limit: usize },
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        CsvError::ParseError {
            line,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Structural validation failures. Terminal for the current batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Required header columns are absent, listed in required-list order.
    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

impl ValidationError {
    /// The missing column names, if any.
    pub fn missing_columns(&self) -> &[String] {
        match self {
            ValidationError::MissingColumns(cols) => cols,
        }
    }
}

// =============================================================================
// Barcode Errors
// =============================================================================

/// Errors from the barcode encoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BarcodeError {
    /// Nothing to encode.
    #[error("Cannot encode an empty value")]
    Empty,

    /// The value contains characters outside the Code 128 B set.
    #[error("Cannot encode '{value}': {reason}")]
    Unsupported { value: String, reason: String },
}

// =============================================================================
// Document Errors
// =============================================================================

/// Errors while assembling or exporting a label document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The record set has no records, so there is nothing to print.
    #[error("No records to print")]
    NoRecords,

    /// Failed to write the document.
    #[error("Failed to write document: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Session Errors (top-level)
// =============================================================================

/// Top-level errors returned by [`crate::session::LabelSession`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// A newer upload started before this one finished.
    #[error("Upload #{ticket} was superseded by upload #{current}")]
    Stale { ticket: u64, current: u64 },

    /// No valid record set has been loaded yet.
    #[error("No CSV loaded")]
    NoRecords,

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Header validation error.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Document error.
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for barcode operations.
pub type BarcodeResult<T> = Result<T, BarcodeError>;

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let csv_err = CsvError::EmptyFile;
        let session_err: SessionError = csv_err.into();
        assert!(session_err.to_string().contains("empty"));

        let validation_err = ValidationError::MissingColumns(vec!["tracking".into()]);
        let session_err: SessionError = validation_err.into();
        assert_eq!(session_err.to_string(), "Missing columns: tracking");
    }

    #[test]
    fn test_missing_columns_format() {
        let err = ValidationError::MissingColumns(vec!["to_phone".into(), "weight".into()]);
        assert_eq!(err.to_string(), "Missing columns: to_phone, weight");
        assert_eq!(err.missing_columns(), ["to_phone", "weight"]);
    }

    #[test]
    fn test_stale_upload_format() {
        let err = SessionError::Stale { ticket: 1, current: 3 };
        let msg = err.to_string();
        assert!(msg.contains("#1"));
        assert!(msg.contains("#3"));
    }
}
