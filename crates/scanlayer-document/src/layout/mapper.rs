// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text region mapper — normalized OCR boxes to page points.

use scanlayer_core::{BoxOrigin, PageGeometry, Rect, TextObservation};

/// An observation placed on the page, bottom-left origin, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub page_rect: Rect,
}

/// Map a normalized box onto the page.
///
/// Boxes with a top-left origin are flipped (`y' = 1 - y - height`) before
/// scaling so the result always uses the PDF bottom-left convention.
/// Degenerate boxes pass through unchanged; the fitting stage skips them.
pub fn map_to_page_rect(bounds: Rect, origin: BoxOrigin, page: &PageGeometry) -> Rect {
    let y = match origin {
        BoxOrigin::BottomLeft => bounds.y,
        BoxOrigin::TopLeft => 1.0 - bounds.y - bounds.height,
    };
    Rect {
        x: bounds.x * page.width,
        y: y * page.height,
        width: bounds.width * page.width,
        height: bounds.height * page.height,
    }
}

/// Place every observation on the page, preserving order.
pub fn place_observations(
    observations: &[TextObservation],
    origin: BoxOrigin,
    page: &PageGeometry,
) -> Vec<PlacedText> {
    observations
        .iter()
        .map(|obs| PlacedText {
            text: obs.text.clone(),
            page_rect: map_to_page_rect(obs.bounds, origin, page),
        })
        .collect()
}
