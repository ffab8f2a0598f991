// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page plan — the ordered drawing instructions for the single output page.
//
// The plan is pure data; `pdf::writer` turns it into PDF operators. Keeping
// the two apart lets the geometry be checked without parsing PDF bytes.

use scanlayer_core::{FontFamily, PageGeometry, Rect, TextMode};

use super::fit::FittedText;

/// One drawing instruction on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// The source image stretched over the whole page.
    Background { width: f64, height: f64 },
    /// A debug rectangle stroked in page space.
    Outline { rect: Rect, line_width: f64 },
    /// A text run drawn through its transform.
    Text(FittedText),
}

/// Everything needed to render the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    pub geometry: PageGeometry,
    pub font: FontFamily,
    pub text_mode: TextMode,
    pub ops: Vec<DrawOp>,
}

impl PagePlan {
    /// Build the plan: background first, then for each fitted run an optional
    /// outline (when `outlines` is set) followed by the run itself.
    pub fn build(
        geometry: PageGeometry,
        font: FontFamily,
        text_mode: TextMode,
        fitted: Vec<FittedText>,
        outlines: bool,
    ) -> Self {
        let per_item = if outlines { 2 } else { 1 };
        let mut ops = Vec::with_capacity(1 + fitted.len() * per_item);
        ops.push(DrawOp::Background {
            width: geometry.width,
            height: geometry.height,
        });

        for item in fitted {
            if outlines {
                ops.push(DrawOp::Outline {
                    rect: item.page_rect,
                    line_width: 1.0,
                });
            }
            ops.push(DrawOp::Text(item));
        }

        Self {
            geometry,
            font,
            text_mode,
            ops,
        }
    }

    /// Iterate over the text runs only.
    pub fn text_runs(&self) -> impl Iterator<Item = &FittedText> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(item) => Some(item),
            _ => None,
        })
    }

    /// Number of debug outlines in the plan.
    pub fn outline_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Outline { .. }))
            .count()
    }
}
