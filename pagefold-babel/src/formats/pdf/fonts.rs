//! Standard Type1 fonts used by the PDF writer.
//!
//! The writer only uses the base-14 fonts, so no font program is embedded; all
//! it needs is the advance widths to wrap lines and right-align footer text.
//! The metrics table is built once per process and shared read-only.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Font faces available to the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StdFont {
    Regular,
    Bold,
    Mono,
}

impl StdFont {
    pub const ALL: [StdFont; 3] = [StdFont::Regular, StdFont::Bold, StdFont::Mono];

    /// Name of the font in the page resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            StdFont::Regular => "F1",
            StdFont::Bold => "F2",
            StdFont::Mono => "F3",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            StdFont::Regular => "Helvetica",
            StdFont::Bold => "Helvetica-Bold",
            StdFont::Mono => "Courier",
        }
    }

    /// Width of `text` in points when set at `size`.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let metrics = &METRICS[&self];
        let units: u32 = text.chars().map(|c| u32::from(metrics.advance(c))).sum();
        units as f32 * size / 1000.0
    }
}

/// Advance widths in 1/1000 em for the printable ASCII range.
struct FontMetrics {
    ascii: [u16; 95],
    bullet: u16,
    fallback: u16,
}

impl FontMetrics {
    fn proportional(ascii: [u16; 95]) -> Self {
        FontMetrics {
            ascii,
            bullet: 350,
            fallback: 556,
        }
    }

    fn monospaced(width: u16) -> Self {
        FontMetrics {
            ascii: [width; 95],
            bullet: width,
            fallback: width,
        }
    }

    fn advance(&self, c: char) -> u16 {
        match c {
            ' '..='~' => self.ascii[c as usize - 0x20],
            '\u{2022}' => self.bullet,
            _ => self.fallback,
        }
    }
}

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

static METRICS: Lazy<HashMap<StdFont, FontMetrics>> = Lazy::new(|| {
    HashMap::from([
        (StdFont::Regular, FontMetrics::proportional(HELVETICA)),
        (StdFont::Bold, FontMetrics::proportional(HELVETICA_BOLD)),
        (StdFont::Mono, FontMetrics::monospaced(600)),
    ])
});

/// Encode text as WinAnsi bytes for a simple-font `Tj` operand.
///
/// Characters outside the encoding become `?`; tabs become a space.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' => b' ',
            ' '..='~' => c as u8,
            '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            _ => b'?',
        })
        .collect()
}
