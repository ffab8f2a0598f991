// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Scanlayer text-layer pipeline.
//
// All coordinates are `f64`. Normalized rectangles live in `[0, 1]`; page
// rectangles are in PDF points with the origin at the bottom-left corner.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, used both for normalized OCR boxes and page rects.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle has no area (or a NaN extent).
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Right edge (`x + width`).
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge (`y + height`) in a bottom-left coordinate system.
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.2}, {:.2}, {:.2}, {:.2})",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Vertical origin convention of a recognizer's normalized boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoxOrigin {
    /// `y` grows upwards from the bottom edge (PDF convention).
    #[default]
    BottomLeft,
    /// `y` grows downwards from the top edge (raster convention).
    TopLeft,
}

/// One recognized run of text and its normalized bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextObservation {
    pub text: String,
    /// Normalized to the image size, each coordinate in `[0, 1]`.
    pub bounds: Rect,
}

impl TextObservation {
    pub fn new(text: impl Into<String>, bounds: Rect) -> Self {
        Self {
            text: text.into(),
            bounds,
        }
    }
}

/// A saved set of observations together with the origin convention they use.
///
/// This is the on-disk format for `--save-observations` / `--observations`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObservationSet {
    #[serde(default)]
    pub origin: BoxOrigin,
    pub observations: Vec<TextObservation>,
}

/// Page size in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
}

/// Standard Type1 font families available for the text layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    #[default]
    Helvetica,
    TimesRoman,
    Courier,
}

impl FontFamily {
    /// PostScript base font name.
    pub fn base_font_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::TimesRoman => "Times-Roman",
            Self::Courier => "Courier",
        }
    }
}

/// How the text layer is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextMode {
    /// Selectable and searchable but not painted (render mode 3).
    #[default]
    Invisible,
    /// Painted as filled black glyphs over the background.
    Fill,
}

/// Document information dictionary entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub creator: String,
    pub subject: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_rects_are_degenerate() {
        assert!(Rect::new(0.1, 0.1, 0.0, 0.2).is_degenerate());
        assert!(Rect::new(0.1, 0.1, 0.2, 0.0).is_degenerate());
        assert!(Rect::new(0.0, 0.0, f64::NAN, 1.0).is_degenerate());
        assert!(!Rect::new(0.0, 0.0, 0.5, 0.5).is_degenerate());
    }

    #[test]
    fn observation_set_defaults_to_bottom_left() {
        let json = r#"{"observations":[
            {"text":"Total","bounds":{"x":0.1,"y":0.2,"width":0.3,"height":0.05}}
        ]}"#;
        let set: ObservationSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.origin, BoxOrigin::BottomLeft);
        assert_eq!(set.observations.len(), 1);
        assert_eq!(set.observations[0].text, "Total");
    }

    #[test]
    fn origin_uses_kebab_case() {
        let json = serde_json::to_string(&BoxOrigin::TopLeft).unwrap();
        assert_eq!(json, "\"top-left\"");
    }

    #[test]
    fn base_font_names() {
        assert_eq!(FontFamily::Helvetica.base_font_name(), "Helvetica");
        assert_eq!(FontFamily::TimesRoman.base_font_name(), "Times-Roman");
        assert_eq!(FontFamily::Courier.base_font_name(), "Courier");
    }
}
