//! Helvetica advance widths, used to wrap text before it reaches the page.
//!
//! Widths are in 1/1000 em, from the standard Helvetica AFM. Characters
//! outside printable ASCII get the digit width (556).

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.15;

const DEFAULT_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    // ' ' ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

fn glyph_width(c: char) -> u16 {
    let code = c as u32;
    if (0x20..0x7f).contains(&code) {
        HELVETICA_ASCII[(code - 0x20) as usize]
    } else {
        DEFAULT_WIDTH
    }
}

/// Width of `text` in millimetres at `font_size` points.
pub fn text_width_mm(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c) as u32).sum();
    units as f32 / 1000.0 * font_size / PT_PER_MM
}

/// Distance between baselines in millimetres at `font_size` points.
pub fn line_height_mm(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_FACTOR / PT_PER_MM
}
