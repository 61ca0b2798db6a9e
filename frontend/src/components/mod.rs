//! UI Components for the label generator.
//!
//! # Layout Components
//! - [`Header`] - Title bar with the loaded label count
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - CSV drop zone and status line
//! - [`PreviewSection`] - One card per label
//! - [`DownloadSection`] - Format picker and downloads
//! - [`Toast`] - Transient notification

mod download;
mod footer;
mod header;
mod hero;
mod preview;
mod toast;
mod upload;

pub use download::*;
pub use footer::*;
pub use header::*;
pub use hero::*;
pub use preview::*;
pub use toast::*;
pub use upload::*;
