//! Code 128 barcodes for tracking identifiers.
//!
//! Encoding is delegated to `barcoders` (character set B, which covers
//! printable ASCII). The result is a [`Barcode`]: a flat list of modules
//! (1 = bar, 0 = space) plus the geometry used to draw it. Geometry mirrors
//! a raster barcode of `module_width` px per module, `height` px tall,
//! surrounded by a `margin` px quiet zone, with no human-readable text.
//!
//! The same pattern is rendered to SVG for previews and drawn as vector
//! bars on PDF pages.

use barcoders::sym::code128::Code128;
use std::fmt::Write as _;

use crate::error::{BarcodeError, BarcodeResult};

/// Prefix selecting Code 128 character set B in `barcoders`.
const CODE_SET_B: char = '\u{0181}';

/// Value encoded when a record has no usable tracking identifier.
pub const PLACEHOLDER: &str = "-";

/// Rendering geometry, in barcode pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarcodeOptions {
    pub module_width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        Self {
            module_width: 1.0,
            height: 35.0,
            margin: 10.0,
        }
    }
}

/// A single filled bar, in barcode pixels relative to the image origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x: f32,
    pub width: f32,
}

/// An encoded Code 128 symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Barcode {
    value: String,
    modules: Vec<u8>,
    options: BarcodeOptions,
}

impl Barcode {
    /// Encode `value` with default options.
    pub fn encode(value: &str) -> BarcodeResult<Self> {
        Self::encode_with(value, BarcodeOptions::default())
    }

    pub fn encode_with(value: &str, options: BarcodeOptions) -> BarcodeResult<Self> {
        if value.is_empty() {
            return Err(BarcodeError::Empty);
        }
        if let Some(bad) = value.chars().find(|c| !(' '..='~').contains(c)) {
            return Err(BarcodeError::Unsupported {
                value: value.to_string(),
                reason: format!("character {:?} is outside Code 128 set B", bad),
            });
        }

        let symbol = Code128::new(format!("{}{}", CODE_SET_B, value)).map_err(|e| {
            BarcodeError::Unsupported {
                value: value.to_string(),
                reason: format!("{:?}", e),
            }
        })?;

        Ok(Self {
            value: value.to_string(),
            modules: symbol.encode(),
            options,
        })
    }

    /// Encode `value`, falling back to the placeholder glyph when it is
    /// empty or not encodable.
    pub fn encode_or_placeholder(value: &str) -> Self {
        Self::encode(value)
            .or_else(|_| Self::encode(PLACEHOLDER))
            .unwrap_or_else(|_| Self {
                value: PLACEHOLDER.to_string(),
                modules: Vec::new(),
                options: BarcodeOptions::default(),
            })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn modules(&self) -> &[u8] {
        &self.modules
    }

    pub fn options(&self) -> BarcodeOptions {
        self.options
    }

    /// Full image width including quiet zones.
    pub fn image_width(&self) -> f32 {
        self.modules.len() as f32 * self.options.module_width + 2.0 * self.options.margin
    }

    /// Full image height including quiet zones.
    pub fn image_height(&self) -> f32 {
        self.options.height + 2.0 * self.options.margin
    }

    /// Runs of consecutive bar modules merged into rectangles.
    pub fn bars(&self) -> Vec<Bar> {
        let mw = self.options.module_width;
        let mut bars = Vec::new();
        let mut run_start: Option<usize> = None;

        for (i, &module) in self.modules.iter().chain(std::iter::once(&0)).enumerate() {
            match (module, run_start) {
                (1, None) => run_start = Some(i),
                (0, Some(start)) => {
                    bars.push(Bar {
                        x: self.options.margin + start as f32 * mw,
                        width: (i - start) as f32 * mw,
                    });
                    run_start = None;
                }
                _ => {}
            }
        }
        bars
    }

    /// Standalone SVG image, white background, black bars.
    pub fn to_svg(&self) -> String {
        let w = self.image_width();
        let h = self.image_height();
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        let _ = write!(svg, r##"<rect width="{w}" height="{h}" fill="#ffffff"/><g fill="#000000">"##);
        for bar in self.bars() {
            let _ = write!(
                svg,
                r#"<rect x="{}" y="{}" width="{}" height="{}"/>"#,
                bar.x, self.options.margin, bar.width, self.options.height
            );
        }
        svg.push_str("</g></svg>");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_tracking() {
        let code = Barcode::encode("TRK001").unwrap();
        assert_eq!(code.value(), "TRK001");
        let modules = code.modules();
        assert!(modules.len() > 6 * 11);
        assert_eq!(modules.first(), Some(&1));
        assert_eq!(modules.last(), Some(&1));
    }

    #[test]
    fn test_empty_value_rejected() {
        assert_eq!(Barcode::encode(""), Err(BarcodeError::Empty));
    }

    #[test]
    fn test_non_ascii_rejected() {
        let err = Barcode::encode("TRK-é").unwrap_err();
        assert!(matches!(err, BarcodeError::Unsupported { .. }));
    }

    #[test]
    fn test_placeholder_fallback() {
        let code = Barcode::encode_or_placeholder("");
        assert_eq!(code.value(), PLACEHOLDER);
        assert!(!code.modules().is_empty());
    }

    #[test]
    fn test_bars_cover_all_dark_modules() {
        let code = Barcode::encode("ABC").unwrap();
        let dark = code.modules().iter().filter(|&&m| m == 1).count() as f32;
        let covered: f32 = code.bars().iter().map(|b| b.width).sum();
        assert_eq!(covered, dark);
        assert!(code.bars().iter().all(|b| b.x >= code.options().margin));
    }

    #[test]
    fn test_image_size_includes_margins() {
        let code = Barcode::encode("A").unwrap();
        assert_eq!(code.image_height(), 55.0);
        assert_eq!(code.image_width(), code.modules().len() as f32 + 20.0);
    }

    #[test]
    fn test_svg_output() {
        let svg = Barcode::encode("TRK001").unwrap().to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"height="35""#));
    }
}
