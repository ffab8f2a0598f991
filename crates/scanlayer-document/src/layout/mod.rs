// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module — page geometry, box mapping, text fitting, and the page plan.

pub mod fit;
pub mod geometry;
pub mod mapper;
pub mod metrics;
pub mod plan;

pub use fit::{FittedText, RenderTransform, fit, fit_all};
pub use geometry::compute_page_geometry;
pub use mapper::{PlacedText, map_to_page_rect, place_observations};
pub use metrics::{BuiltinMetrics, TextExtent, TextMeasurer, encode_winansi};
pub use plan::{DrawOp, PagePlan};
