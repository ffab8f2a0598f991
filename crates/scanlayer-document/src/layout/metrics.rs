// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text measurement for the standard Type1 fonts.
//
// The text layer is drawn with one of the PDF base-14 fonts, so glyph
// advances come straight from the Adobe AFM tables (1/1000 em units, indexed
// by WinAnsiEncoding code). Line height is the font bounding box height, the
// same figure a layout engine reserves for a single line.
//
// Characters WinAnsi cannot encode are drawn as `?`, and measured as `?`.

use scanlayer_core::FontFamily;

/// Natural, unscaled extent of a single line of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    /// Sum of glyph advances.
    pub width: f64,
    /// `ascent + descent`.
    pub height: f64,
    /// Distance from the baseline to the top of the line box.
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the line box (positive).
    pub descent: f64,
}

/// Measures single-line text runs. Implemented by [`BuiltinMetrics`]; other
/// layout stacks can plug in their own measurements.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> TextExtent;
}

/// AFM metrics of one standard font.
#[derive(Debug)]
pub struct BuiltinMetrics {
    /// Advances for WinAnsi codes 32..=255.
    widths: &'static [u16; 224],
    /// Font bounding box `[llx, lly, urx, ury]`.
    font_bbox: [i16; 4],
}

impl BuiltinMetrics {
    pub fn for_family(family: FontFamily) -> &'static Self {
        match family {
            FontFamily::Helvetica => &HELVETICA,
            FontFamily::TimesRoman => &TIMES_ROMAN,
            FontFamily::Courier => &COURIER,
        }
    }

    /// Advance of a single character in 1/1000 em, as it will be drawn.
    pub fn advance(&self, ch: char) -> u16 {
        match winansi_code(ch).unwrap_or(SUBSTITUTE) {
            // Control characters take no space.
            code if code < 32 => 0,
            code => self.widths[usize::from(code - 32)],
        }
    }
}

impl TextMeasurer for BuiltinMetrics {
    fn measure(&self, text: &str, font_size: f64) -> TextExtent {
        let units: u32 = text.chars().map(|ch| u32::from(self.advance(ch))).sum();
        let scale = font_size / 1000.0;
        let ascent = f64::from(self.font_bbox[3]) * scale;
        let descent = -f64::from(self.font_bbox[1]) * scale;
        TextExtent {
            width: f64::from(units) * scale,
            height: ascent + descent,
            ascent,
            descent,
        }
    }
}

/// Map a character to its WinAnsiEncoding (CP-1252) code.
/// Byte drawn in place of characters WinAnsi cannot encode.
const SUBSTITUTE: u8 = b'?';

/// Encode a run for a base-14 font declared with `/WinAnsiEncoding`.
///
/// One byte per character; [`BuiltinMetrics::advance`] measures exactly these
/// bytes.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| winansi_code(ch).unwrap_or(SUBSTITUTE))
        .collect()
}

fn winansi_code(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x00..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match ch {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        },
    }
}

// Width tables from the Adobe AFM files, WinAnsi codes 32..=255.

#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 224] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

#[rustfmt::skip]
static TIMES_ROMAN_WIDTHS: [u16; 224] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541, 0,
    500, 0, 333, 500, 444, 1000, 500, 500, 333, 1000, 556, 333, 889, 0, 611, 0,
    0, 333, 333, 444, 444, 350, 500, 1000, 333, 980, 389, 333, 722, 0, 444, 722,
    250, 333, 500, 500, 500, 500, 200, 500, 333, 760, 276, 500, 564, 333, 760, 333,
    400, 564, 300, 300, 333, 500, 453, 250, 333, 300, 310, 500, 750, 750, 750, 444,
    722, 722, 722, 722, 722, 722, 889, 667, 611, 611, 611, 611, 333, 333, 333, 333,
    722, 722, 722, 722, 722, 722, 722, 564, 722, 722, 722, 722, 722, 722, 556, 500,
    444, 444, 444, 444, 444, 444, 667, 444, 444, 444, 444, 444, 278, 278, 278, 278,
    500, 500, 500, 500, 500, 500, 500, 564, 500, 500, 500, 500, 500, 500, 500, 500,
];

static COURIER_WIDTHS: [u16; 224] = [600; 224];

static HELVETICA: BuiltinMetrics = BuiltinMetrics {
    widths: &HELVETICA_WIDTHS,
    font_bbox: [-166, -225, 1000, 931],
};

static TIMES_ROMAN: BuiltinMetrics = BuiltinMetrics {
    widths: &TIMES_ROMAN_WIDTHS,
    font_bbox: [-168, -218, 1000, 898],
};

static COURIER: BuiltinMetrics = BuiltinMetrics {
    widths: &COURIER_WIDTHS,
    font_bbox: [-23, -250, 715, 805],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn helvetica_invoice_width() {
        // I=278 n=556 v=500 o=556 i=222 c=500 e=556 → 3168 units.
        let extent = BuiltinMetrics::for_family(FontFamily::Helvetica).measure("Invoice", 12.0);
        assert!(approx(extent.width, 3168.0 * 12.0 / 1000.0));
    }

    #[test]
    fn line_height_is_bbox_height() {
        let extent = BuiltinMetrics::for_family(FontFamily::Helvetica).measure("x", 10.0);
        assert!(approx(extent.ascent, 9.31));
        assert!(approx(extent.descent, 2.25));
        assert!(approx(extent.height, 11.56));
    }

    #[test]
    fn courier_is_monospaced() {
        let metrics = BuiltinMetrics::for_family(FontFamily::Courier);
        let narrow = metrics.measure("iiii", 12.0);
        let wide = metrics.measure("WWWW", 12.0);
        assert!(approx(narrow.width, wide.width));
        assert!(approx(narrow.width, 4.0 * 600.0 * 12.0 / 1000.0));
    }

    #[test]
    fn empty_text_has_zero_width() {
        let extent = BuiltinMetrics::for_family(FontFamily::TimesRoman).measure("", 12.0);
        assert_eq!(extent.width, 0.0);
        assert!(extent.height > 0.0);
    }

    #[test]
    fn unencodable_chars_measure_as_substitute() {
        let metrics = BuiltinMetrics::for_family(FontFamily::TimesRoman);
        assert_eq!(metrics.advance('漢'), metrics.advance('?'));
        assert_eq!(metrics.advance('\u{7F}'), metrics.advance('?'));
        assert_eq!(metrics.advance('€'), 500);
        assert_eq!(metrics.advance('\n'), 0);
        assert_eq!(metrics.advance('é'), 444);
    }

    #[test]
    fn winansi_encoding_is_one_byte_per_char() {
        assert_eq!(encode_winansi("Café"), b"Caf\xE9");
        assert_eq!(encode_winansi("5 € – Müller"), b"5 \x80 \x96 M\xFCller");
        assert_eq!(encode_winansi("東京 Ltd"), b"?? Ltd");
    }

    #[test]
    fn width_matches_encoded_bytes() {
        let metrics = BuiltinMetrics::for_family(FontFamily::Helvetica);
        let text = "Crème brûlée № 5";
        let from_bytes: u32 = encode_winansi(text)
            .iter()
            .map(|&code| u32::from(metrics.widths[usize::from(code - 32)]))
            .sum();
        let extent = metrics.measure(text, 1000.0);
        assert!(approx(extent.width, f64::from(from_bytes)));
    }
}
