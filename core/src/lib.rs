//! # Shiplabel - shipping labels from a CSV of shipments
//!
//! Shiplabel validates a CSV of shipments, previews one label per row and
//! lays the labels out into a printable PDF, with a Code 128 barcode of each
//! tracking number.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Validator  │────▶│  RecordSet  │
//! │  (any enc)  │     │  (auto-enc) │     │   (flags)   │     │             │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                                    │
//!                          ┌─────────────────────────────────────────┤
//!                          ▼                                         ▼
//!                   ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//!                   │   Preview   │     │   Layout    │◀────│  Assembler  │
//!                   │ (SVG cards) │     │ (80×130 mm) │     │  (1/page)   │
//!                   └─────────────┘     └──────┬──────┘     └─────────────┘
//!                                              ▼
//!                                       ┌─────────────┐
//!                                       │  labels.pdf │
//!                                       └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shiplabel::{LabelSession, PageFormat, PdfOptions};
//!
//! let mut session = LabelSession::new();
//! session.upload("shipments.csv", &std::fs::read("shipments.csv")?)?;
//! let pdf = session.generate(PageFormat::FourBySix, &PdfOptions::default())?;
//! std::fs::write("labels.pdf", pdf)?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types, one per stage
//! - [`models`] - Domain models (ShipmentRecord, RecordSet, PageFormat)
//! - [`parser`] - CSV parsing with auto-detection
//! - [`validation`] - Required columns and advisory flags
//! - [`barcode`] - Code 128 encoding
//! - [`preview`] - Preview cards
//! - [`layout`] - Label geometry and drawing surfaces
//! - [`document`] - Page assembly and PDF output
//! - [`session`] - Upload state for interactive front ends
//! - [`template`] - Sample CSV
//! - [`config`] - Constants and environment settings

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Parsing
pub mod parser;
pub mod template;

// Validation
pub mod validation;

// Rendering
pub mod barcode;
pub mod document;
pub mod layout;
pub mod preview;

// Session
pub mod session;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    BarcodeError, BarcodeResult, CsvError, CsvResult, DocumentError, DocumentResult,
    SessionError, SessionResult, ValidationError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    AnnotatedRecord, PageFormat, RecordFlags, RecordSet, ShipmentRecord, REQUIRED_FIELDS,
};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes, parse_file, parse_str,
    ParseResult,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid, missing_columns, validate};

// =============================================================================
// Re-exports - Rendering
// =============================================================================

pub use barcode::{Barcode, BarcodeOptions};
pub use document::{assemble, LabelDocument, PdfOptions};
pub use layout::{draw_label, LabelSurface, PageCanvas};
pub use preview::{render, CardKey, Preview, PreviewCard};

// =============================================================================
// Re-exports - Session
// =============================================================================

pub use config::Settings;
pub use session::{CsvStatus, LabelSession, UploadTicket};
pub use template::{CSV_MIME, SAMPLE_CSV, SAMPLE_FILENAME};
