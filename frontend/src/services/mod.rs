//! Browser services.
//!
//! # Services
//!
//! - [`file`] - Reading dropped or picked files into memory
//! - [`download`] - Offering generated bytes as a file download

pub mod download;
pub mod file;

pub use download::*;
pub use file::*;
