//! Application configuration.
//!
//! Timings and file names come from `shiplabel::config` so the browser and
//! the CLI agree on them.

pub use shiplabel::config::{
    COUNT_POP_MS, MAX_FILE_SIZE, OUTPUT_FILENAME, PARSE_DELAY_MS, PDF_MIME, TOAST_MS,
};
pub use shiplabel::template::{CSV_MIME, SAMPLE_FILENAME};

/// Application name shown in the header and the document title.
pub const APP_NAME: &str = "Shipping Label Generator";

/// DOM id of the hidden file input behind the drop zone.
pub const FILE_INPUT_ID: &str = "fileInput";

/// Toast shown when a file is received.
pub const LOADED_TOAST: &str = "CSV Loaded Successfully";
