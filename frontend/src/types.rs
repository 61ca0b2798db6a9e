//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Status Types** - Status line and toast messages
//! - **Error Types** - Frontend error handling

use shiplabel::{CsvStatus, SessionError};
use std::fmt;

// =============================================================================
// Status Types
// =============================================================================

/// Status line severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    /// Work in progress
    Info,
    /// CSV accepted
    Success,
    /// CSV rejected or an action failed
    Error,
}

impl StatusLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusLevel::Info => "status-info",
            StatusLevel::Success => "status-ok",
            StatusLevel::Error => "status-error",
        }
    }
}

/// Text shown on the status line under the drop zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        self.level.css_class()
    }
}

impl From<&CsvStatus> for StatusMessage {
    fn from(status: &CsvStatus) -> Self {
        Self {
            level: if status.is_error() {
                StatusLevel::Error
            } else {
                StatusLevel::Success
            },
            text: status.to_string(),
        }
    }
}

/// A transient notification. `id` lets a timer dismiss only the toast it
/// was started for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastMessage {
    pub id: u64,
    pub text: String,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
///
/// Unified error type for all frontend operations.
#[derive(Clone, Debug)]
pub enum AppError {
    /// Reading the selected file failed.
    File(String),
    /// The CSV was rejected.
    Validation(String),
    /// Building the label document failed.
    Document(String),
    /// A browser API call failed.
    Browser(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::File(msg) => write!(f, "File error: {}", msg),
            AppError::Validation(msg) => write!(f, "{}", msg),
            AppError::Document(msg) => write!(f, "Document error: {}", msg),
            AppError::Browser(msg) => write!(f, "Browser error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Csv(e) => AppError::File(e.to_string()),
            SessionError::Validation(e) => AppError::Validation(e.to_string()),
            SessionError::Document(e) => AppError::Document(e.to_string()),
            other => AppError::Document(other.to_string()),
        }
    }
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shiplabel::{CsvError, ValidationError};

    #[test]
    fn test_accepted_csv_is_success() {
        let msg = StatusMessage::from(&CsvStatus::Ok);
        assert_eq!(msg.level, StatusLevel::Success);
        assert_eq!(msg.text, "CSV OK");
        assert_eq!(msg.css_class(), "status-ok");
    }

    #[test]
    fn test_missing_columns_is_error() {
        let status = CsvStatus::MissingColumns(vec!["a".into(), "b".into()]);
        let msg = StatusMessage::from(&status);
        assert_eq!(msg.level, StatusLevel::Error);
        assert_eq!(msg.text, "Missing columns: a, b");
        assert_eq!(msg.css_class(), "status-error");
    }

    #[test]
    fn test_unreadable_is_error() {
        let msg = StatusMessage::from(&CsvStatus::Unreadable("bad quote".into()));
        assert_eq!(msg.level, StatusLevel::Error);
        assert_eq!(msg.text, "Could not read CSV: bad quote");
    }

    #[test]
    fn test_info_message() {
        let msg = StatusMessage::info("Processing CSV…");
        assert_eq!(msg.css_class(), "status-info");
    }

    #[test]
    fn test_session_errors_map_to_app_errors() {
        let err = AppError::from(SessionError::from(ValidationError::MissingColumns(vec!["tracking".into()])));
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "Missing columns: tracking");

        let err = AppError::from(SessionError::from(CsvError::EmptyFile));
        assert!(matches!(err, AppError::File(_)));
        assert_eq!(err.to_string(), "File error: CSV file is empty");

        let err = AppError::from(SessionError::NoRecords);
        assert!(matches!(err, AppError::Document(_)));
        assert_eq!(err.to_string(), "Document error: No CSV loaded");
    }
}
