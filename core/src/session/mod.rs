//! Upload session: owns the current record set.
//!
//! The front end keeps one [`LabelSession`] and drives it with plain
//! request/response calls:
//!
//! ```text
//! begin_upload ──► UploadTicket ──► complete_upload(bytes)
//!                                        │
//!                        ┌───────────────┴───────────────┐
//!                        ▼                               ▼
//!                 status: CSV OK                 status: Missing columns
//!                 records: Some(set)             records: None
//!                        │
//!             preview() / generate(format)
//! ```
//!
//! Uploads can overlap in the browser (a second file dropped while the first
//! is still being read). Every [`begin_upload`](LabelSession::begin_upload)
//! issues a newer ticket, and only the newest ticket may publish a result.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::MAX_FILE_SIZE;
use crate::document::{assemble, PdfOptions};
use crate::error::{CsvError, SessionError, SessionResult, ValidationError};
use crate::models::{PageFormat, RecordSet};
use crate::parser::parse_bytes;
use crate::preview::{render, Preview};
use crate::validation::validate;

/// Identifies one upload request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UploadTicket(u64);

impl UploadTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Outcome of the latest upload, as shown on the status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum CsvStatus {
    Ok,
    MissingColumns(Vec<String>),
    Unreadable(String),
}

impl CsvStatus {
    pub fn is_error(&self) -> bool {
        !matches!(self, CsvStatus::Ok)
    }
}

impl fmt::Display for CsvStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvStatus::Ok => f.write_str("CSV OK"),
            CsvStatus::MissingColumns(cols) => write!(f, "Missing columns: {}", cols.join(", ")),
            CsvStatus::Unreadable(message) => write!(f, "Could not read CSV: {}", message),
        }
    }
}

/// Holds the record set of the most recent successful upload.
#[derive(Debug, Default)]
pub struct LabelSession {
    generation: u64,
    file_name: Option<String>,
    records: Option<RecordSet>,
    status: Option<CsvStatus>,
}

impl LabelSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new upload. Any ticket issued earlier becomes stale.
    pub fn begin_upload(&mut self, file_name: impl Into<String>) -> UploadTicket {
        self.generation += 1;
        self.file_name = Some(file_name.into());
        UploadTicket(self.generation)
    }

    /// False once a newer upload has started.
    pub fn is_current(&self, ticket: UploadTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Parse and validate the bytes of the upload identified by `ticket`.
    ///
    /// A stale ticket leaves the session untouched. A rejected batch
    /// clears the previous record set so nothing stale can be printed.
    pub fn complete_upload(&mut self, ticket: UploadTicket, bytes: &[u8]) -> SessionResult<&RecordSet> {
        if !self.is_current(ticket) {
            warn!("Dropping upload #{} (current is #{})", ticket.0, self.generation);
            return Err(SessionError::Stale {
                ticket: ticket.0,
                current: self.generation,
            });
        }

        self.records = None;

        match Self::load(bytes) {
            Ok(records) => {
                info!(
                    "Loaded {} records ({} flagged) from {}",
                    records.len(),
                    records.flagged_count(),
                    self.file_name.as_deref().unwrap_or("upload")
                );
                self.status = Some(CsvStatus::Ok);
                Ok(&*self.records.insert(records))
            }
            Err(SessionError::Validation(ValidationError::MissingColumns(cols))) => {
                self.status = Some(CsvStatus::MissingColumns(cols.clone()));
                Err(ValidationError::MissingColumns(cols).into())
            }
            Err(e) => {
                self.status = Some(CsvStatus::Unreadable(e.to_string()));
                Err(e)
            }
        }
    }

    fn load(bytes: &[u8]) -> SessionResult<RecordSet> {
        if bytes.len() > MAX_FILE_SIZE {
            return Err(CsvError::TooLarge {
                size: bytes.len(),
                limit: MAX_FILE_SIZE,
            }
            .into());
        }
        let parsed = parse_bytes(bytes)?;
        Ok(validate(parsed.records)?)
    }

    /// Convenience for callers without overlapping uploads.
    pub fn upload(&mut self, file_name: impl Into<String>, bytes: &[u8]) -> SessionResult<&RecordSet> {
        let ticket = self.begin_upload(file_name);
        self.complete_upload(ticket, bytes)
    }

    pub fn status(&self) -> Option<&CsvStatus> {
        self.status.as_ref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn records(&self) -> Option<&RecordSet> {
        self.records.as_ref()
    }

    pub fn record_count(&self) -> usize {
        self.records.as_ref().map_or(0, RecordSet::len)
    }

    /// Preview of the loaded records, or `None` when nothing is loaded.
    ///
    /// Tagged with the current upload generation, so every upload yields
    /// fresh card keys.
    pub fn preview(&self) -> Option<Preview> {
        self.records.as_ref().map(|records| Preview {
            generation: self.generation,
            ..render(records)
        })
    }

    /// Lay out and serialise the loaded records.
    pub fn generate(&self, format: PageFormat, options: &PdfOptions) -> SessionResult<Vec<u8>> {
        let records = self.records.as_ref().ok_or(SessionError::NoRecords)?;
        let document = assemble(records, format)?;
        Ok(document.to_pdf(options))
    }
}
