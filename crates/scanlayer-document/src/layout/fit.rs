// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text fitting — compute the transform that stretches a text run laid out at
// its natural size into the rectangle the recognizer detected.
//
// The run is measured at the reference font size, then scaled horizontally to
// the box width and vertically to the box height times the compression `K`.
// The line sits at the top of a layout box `natural_height / K` tall, so after
// scaling the top of the font box coincides with the top of the page rect.

use scanlayer_core::{FitOptions, Rect};
use tracing::trace;

use super::mapper::PlacedText;
use super::metrics::TextMeasurer;

/// Translate-then-scale transform applied to a run drawn at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl RenderTransform {
    /// Line width that renders as one point once the scale is applied.
    pub fn stroke_width(&self) -> f64 {
        1.0 / self.scale_x.max(self.scale_y)
    }
}

/// A run ready to draw: text, target rect, transform, and baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub text: String,
    pub page_rect: Rect,
    pub transform: RenderTransform,
    /// Baseline height in unscaled text space.
    pub baseline: f64,
    pub font_size: f64,
}

/// Fit `text` into `page_rect`.
///
/// Returns `None` for regions that cannot be drawn: blank text, zero-width
/// runs, degenerate rectangles, or scales that are not finite and positive.
pub fn fit(
    text: &str,
    page_rect: Rect,
    measurer: &dyn TextMeasurer,
    options: &FitOptions,
) -> Option<FittedText> {
    if text.trim().is_empty() || page_rect.is_degenerate() {
        return None;
    }

    let natural = measurer.measure(text, options.reference_font_size);
    if !(natural.width > 0.0 && natural.height > 0.0) {
        return None;
    }

    let k = options.vertical_compression;
    let scale_x = page_rect.width / natural.width;
    let scale_y = (page_rect.height / natural.height) * k;
    if !usable_scale(scale_x) || !usable_scale(scale_y) {
        trace!(text, scale_x, scale_y, "Skipping region with unusable scale");
        return None;
    }

    Some(FittedText {
        text: text.to_owned(),
        page_rect,
        transform: RenderTransform {
            translate_x: page_rect.x,
            translate_y: page_rect.y,
            scale_x,
            scale_y,
        },
        baseline: natural.height / k - natural.ascent,
        font_size: options.reference_font_size,
    })
}

/// Fit every placed region, dropping the ones [`fit`] skips.
pub fn fit_all(
    placed: &[PlacedText],
    measurer: &dyn TextMeasurer,
    options: &FitOptions,
) -> Vec<FittedText> {
    placed
        .iter()
        .filter_map(|item| fit(&item.text, item.page_rect, measurer, options))
        .collect()
}

fn usable_scale(scale: f64) -> bool {
    scale.is_finite() && scale > 0.0
}
