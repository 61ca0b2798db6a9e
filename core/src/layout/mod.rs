//! Fixed-geometry layout of a single shipping label.
//!
//! A label occupies an 80 × 130 mm cell. Every element is placed at a fixed
//! offset from the cell origin (top-left, y growing downwards):
//!
//! ```text
//!   (0,0) ┌──────────────────────────┐
//!         │ FROM:            (4,8)   │
//!         │ sender block     (4,16)  │
//!         │        ║║│║║│║   (32,36) │  45 × 12 barcode
//!         │ TO:              (4,56)  │
//!         │ recipient block  (4,66)  │
//!         └──────────────────────────┘ (80,130)
//! ```
//!
//! Drawing goes through the [`LabelSurface`] trait. [`PageCanvas`] records
//! the calls as [`DrawOp`]s so a page can be inspected or replayed onto a
//! PDF page later.

pub mod metrics;

use log::warn;

use crate::barcode::Barcode;
use crate::models::ShipmentRecord;
use metrics::text_width_mm;

pub const LABEL_WIDTH: f32 = 80.0;
pub const LABEL_HEIGHT: f32 = 130.0;

/// Wrap width for the address blocks.
pub const BLOCK_WRAP_WIDTH: f32 = 70.0;

const BORDER_WIDTH: f32 = 1.0;
const CAPTION_FONT_SIZE: f32 = 11.0;
const TO_CAPTION_FONT_SIZE: f32 = 14.0;
const RECIPIENT_FONT_SIZE: f32 = 12.0;

const FROM_CAPTION_AT: (f32, f32) = (4.0, 8.0);
const SENDER_AT: (f32, f32) = (4.0, 16.0);
const BARCODE_AT: (f32, f32) = (32.0, 36.0);
const BARCODE_SIZE: (f32, f32) = (45.0, 12.0);
const TO_CAPTION_AT: (f32, f32) = (4.0, 56.0);
const RECIPIENT_AT: (f32, f32) = (4.0, 66.0);

// =============================================================================
// Surface
// =============================================================================

/// Something a label can be drawn on. Coordinates are millimetres from the
/// top-left corner of the page; text `y` is the first line's baseline.
pub trait LabelSurface {
    fn set_line_width(&mut self, width: f32);
    fn set_font_size(&mut self, size: f32);
    fn font_size(&self) -> f32;
    /// Stroke a rectangle outline.
    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    /// Draw lines of text, one baseline per line at the current font size.
    fn text(&mut self, lines: &[String], x: f32, y: f32);
    /// Draw `code` scaled into the given box.
    fn barcode(&mut self, code: &Barcode, x: f32, y: f32, width: f32, height: f32);
    /// Mark the barcode slot of a label that has no encodable tracking value.
    fn barcode_placeholder(&mut self, x: f32, y: f32, width: f32, height: f32);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    LineWidth(f32),
    FontSize(f32),
    Rect { x: f32, y: f32, width: f32, height: f32 },
    Text { lines: Vec<String>, x: f32, y: f32 },
    Barcode { code: Barcode, x: f32, y: f32, width: f32, height: f32 },
    BarcodePlaceholder { x: f32, y: f32, width: f32, height: f32 },
}

/// A surface that records drawing calls for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCanvas {
    width: f32,
    height: f32,
    font_size: f32,
    ops: Vec<DrawOp>,
}

impl PageCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            font_size: 16.0,
            ops: Vec::new(),
        }
    }

    /// Page width and height in millimetres.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// All text drawn on the page, one entry per line.
    pub fn text_lines(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { lines, .. } => Some(lines),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Replay the recorded calls onto another surface.
    pub fn replay<S: LabelSurface>(&self, surface: &mut S) {
        for op in &self.ops {
            match op {
                DrawOp::LineWidth(w) => surface.set_line_width(*w),
                DrawOp::FontSize(s) => surface.set_font_size(*s),
                DrawOp::Rect { x, y, width, height } => surface.rect(*x, *y, *width, *height),
                DrawOp::Text { lines, x, y } => surface.text(lines, *x, *y),
                DrawOp::Barcode { code, x, y, width, height } => {
                    surface.barcode(code, *x, *y, *width, *height)
                }
                DrawOp::BarcodePlaceholder { x, y, width, height } => {
                    surface.barcode_placeholder(*x, *y, *width, *height)
                }
            }
        }
    }
}

impl LabelSurface for PageCanvas {
    fn set_line_width(&mut self, width: f32) {
        self.ops.push(DrawOp::LineWidth(width));
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
        self.ops.push(DrawOp::FontSize(size));
    }

    fn font_size(&self) -> f32 {
        self.font_size
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(DrawOp::Rect { x, y, width, height });
    }

    fn text(&mut self, lines: &[String], x: f32, y: f32) {
        self.ops.push(DrawOp::Text {
            lines: lines.to_vec(),
            x,
            y,
        });
    }

    fn barcode(&mut self, code: &Barcode, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(DrawOp::Barcode {
            code: code.clone(),
            x,
            y,
            width,
            height,
        });
    }

    fn barcode_placeholder(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(DrawOp::BarcodePlaceholder { x, y, width, height });
    }
}

// =============================================================================
// Text wrapping
// =============================================================================

/// Split `text` into lines no wider than `max_width` mm at `font_size` pt.
///
/// Each `\n`-separated paragraph is filled greedily word by word. A word
/// that alone exceeds the limit is broken between characters. Empty
/// paragraphs are kept as empty lines.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let fits = |s: &str| text_width_mm(s, font_size) <= max_width;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split(' ') {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if fits(&candidate) {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            for c in word.chars() {
                current.push(c);
                if !fits(&current) && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::replace(&mut current, c.to_string()));
                }
            }
        }

        lines.push(current);
    }

    lines
}

// =============================================================================
// Label
// =============================================================================

/// Draw one label with its cell's top-left corner at (`x`, `y`).
pub fn draw_label<S: LabelSurface>(surface: &mut S, record: &ShipmentRecord, x: f32, y: f32) {
    surface.set_line_width(BORDER_WIDTH);
    surface.rect(x, y, LABEL_WIDTH, LABEL_HEIGHT);

    surface.set_font_size(CAPTION_FONT_SIZE);
    surface.text(&["FROM:".to_string()], x + FROM_CAPTION_AT.0, y + FROM_CAPTION_AT.1);

    let sender = wrap_text(&record.sender_block(), BLOCK_WRAP_WIDTH, surface.font_size());
    surface.text(&sender, x + SENDER_AT.0, y + SENDER_AT.1);

    let (bx, by) = (x + BARCODE_AT.0, y + BARCODE_AT.1);
    let (bw, bh) = BARCODE_SIZE;
    match Barcode::encode(record.tracking()) {
        Ok(code) => surface.barcode(&code, bx, by, bw, bh),
        Err(e) => {
            warn!("No barcode for label: {}", e);
            surface.barcode_placeholder(bx, by, bw, bh);
        }
    }

    surface.set_font_size(TO_CAPTION_FONT_SIZE);
    surface.text(&["TO:".to_string()], x + TO_CAPTION_AT.0, y + TO_CAPTION_AT.1);
    surface.set_font_size(RECIPIENT_FONT_SIZE);

    let recipient = wrap_text(&record.recipient_block(), BLOCK_WRAP_WIDTH, surface.font_size());
    surface.text(&recipient, x + RECIPIENT_AT.0, y + RECIPIENT_AT.1);
}
