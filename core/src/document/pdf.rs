//! PDF serialisation of assembled label pages.
//!
//! Every page shares one Helvetica Type1 font (WinAnsi encoding), so no font
//! program is embedded. Content streams are Flate-compressed.

use chrono::{Datelike, NaiveDate};
use pdf_writer::{Content, Date, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::barcode::Barcode;
use crate::layout::metrics::{line_height_mm, PT_PER_MM};
use crate::layout::{LabelSurface, PageCanvas};

const FONT_NAME: Name<'static> = Name(b"F1");
const PRODUCER: &str = concat!("shiplabel ", env!("CARGO_PKG_VERSION"));

/// Metadata written into the document information dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfOptions {
    pub title: String,
    /// Left out when `None`, which keeps output byte-for-byte reproducible.
    pub creation_date: Option<NaiveDate>,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            title: "Shipping labels".to_string(),
            creation_date: None,
        }
    }
}

fn mm(v: f32) -> f32 {
    v * PT_PER_MM
}

/// Transcode to WinAnsi. Characters without a WinAnsi code become `?`.
pub fn to_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\t' => b' ',
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

/// A [`LabelSurface`] writing straight into a PDF content stream.
///
/// Converts millimetres to points and flips the y axis, since PDF user
/// space starts at the bottom-left corner.
pub(crate) struct PdfPage {
    content: Content,
    page_height: f32,
    font_size: f32,
}

impl PdfPage {
    pub(crate) fn new(page_height_mm: f32) -> Self {
        Self {
            content: Content::new(),
            page_height: page_height_mm,
            font_size: 16.0,
        }
    }

    /// Page-space y in points for a top-down y in millimetres.
    fn flip(&self, y: f32) -> f32 {
        mm(self.page_height - y)
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.content.finish()
    }
}

impl LabelSurface for PdfPage {
    fn set_line_width(&mut self, width: f32) {
        self.content.set_line_width(mm(width));
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    fn font_size(&self) -> f32 {
        self.font_size
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let bottom = self.flip(y + height);
        self.content.rect(mm(x), bottom, mm(width), mm(height));
        self.content.stroke();
    }

    fn text(&mut self, lines: &[String], x: f32, y: f32) {
        let step = line_height_mm(self.font_size);
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = self.flip(y + i as f32 * step);
            let bytes = to_winansi(line);
            self.content
                .begin_text()
                .set_font(FONT_NAME, self.font_size)
                .next_line(mm(x), baseline)
                .show(Str(&bytes))
                .end_text();
        }
    }

    fn barcode(&mut self, code: &Barcode, x: f32, y: f32, width: f32, height: f32) {
        let sx = width / code.image_width();
        let sy = height / code.image_height();
        let opts = code.options();
        let bar_top = y + opts.margin * sy;
        let bar_height = opts.height * sy;

        self.content.save_state();
        self.content.set_fill_gray(0.0);
        for bar in code.bars() {
            let bottom = self.flip(bar_top + bar_height);
            self.content
                .rect(mm(x + bar.x * sx), bottom, mm(bar.width * sx), mm(bar_height));
        }
        self.content.fill_nonzero();
        self.content.restore_state();
    }

    fn barcode_placeholder(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.content.save_state();
        self.content.set_line_width(mm(0.3));
        self.content.set_dash_pattern([mm(1.0), mm(1.0)], 0.0);
        self.rect(x, y, width, height);
        self.content.restore_state();
    }
}

/// Serialise pages into a complete PDF file.
pub fn write_pdf(pages: &[PageCanvas], options: &PdfOptions) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let font_id = alloc();
    let info_id = alloc();
    let page_ids: Vec<Ref> = pages.iter().map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = pages.iter().map(|_| alloc()).collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(pages.len() as i32);
    pdf.type1_font(font_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    {
        let mut info = pdf.document_info(info_id);
        info.title(TextStr(&options.title));
        info.producer(TextStr(PRODUCER));
        if let Some(date) = options.creation_date {
            info.creation_date(
                Date::new(date.year().clamp(0, 9999) as u16)
                    .month(date.month() as u8)
                    .day(date.day() as u8),
            );
        }
    }

    for ((canvas, &page_id), &content_id) in pages.iter().zip(&page_ids).zip(&content_ids) {
        let (width, height) = canvas.size();

        let mut surface = PdfPage::new(height);
        canvas.replay(&mut surface);
        let raw = surface.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
        pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, mm(width), mm(height)))
            .parent(pages_id)
            .contents(content_id);
        page.resources().fonts().pair(FONT_NAME, font_id);
    }

    pdf.finish()
}
