//! Document assembly: one page per record, one label per page.
//!
//! Every page is drawn into a [`PageCanvas`] first. Serialising to PDF is a
//! separate step ([`LabelDocument::to_pdf`]), so a document can be inspected
//! before any bytes are produced.
//!
//! # Example
//!
//! ```rust,ignore
//! use shiplabel::{assemble, PageFormat, PdfOptions};
//!
//! let document = assemble(&records, PageFormat::FourBySix)?;
//! document.save("labels.pdf", &PdfOptions::default())?;
//! ```

pub mod pdf;

use log::{debug, info};
use std::path::Path;

use crate::error::{DocumentError, DocumentResult};
use crate::layout::{draw_label, PageCanvas};
use crate::models::{PageFormat, RecordSet};

pub use pdf::{write_pdf, PdfOptions};

/// Top-left corner of the label cell on every page, in millimetres.
pub const LABEL_ORIGIN: (f32, f32) = (10.0, 10.0);

/// Laid-out pages ready for export.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDocument {
    format: PageFormat,
    pages: Vec<PageCanvas>,
}

impl LabelDocument {
    pub fn format(&self) -> PageFormat {
        self.format
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[PageCanvas] {
        &self.pages
    }

    pub fn page_size_mm(&self) -> (f32, f32) {
        self.format.page_size_mm()
    }

    /// Serialise to PDF bytes.
    pub fn to_pdf(&self, options: &PdfOptions) -> Vec<u8> {
        write_pdf(&self.pages, options)
    }

    /// Serialise and write to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P, options: &PdfOptions) -> DocumentResult<()> {
        let bytes = self.to_pdf(options);
        std::fs::write(path.as_ref(), &bytes)?;
        info!(
            "Wrote {} pages ({} bytes) to {}",
            self.page_count(),
            bytes.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}

/// Lay out every record on its own page of the given format.
pub fn assemble(records: &RecordSet, format: PageFormat) -> DocumentResult<LabelDocument> {
    if records.is_empty() {
        return Err(DocumentError::NoRecords);
    }

    let (width, height) = format.page_size_mm();
    let (x, y) = LABEL_ORIGIN;
    let pages = records
        .records()
        .iter()
        .map(|record| {
            let mut canvas = PageCanvas::new(width, height);
            draw_label(&mut canvas, record, x, y);
            canvas
        })
        .collect::<Vec<_>>();

    debug!("Assembled {} pages in {} format", pages.len(), format);
    Ok(LabelDocument { format, pages })
}
