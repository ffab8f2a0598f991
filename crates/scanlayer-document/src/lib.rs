// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanlayer-document — Turns a scanned image into a searchable one-page PDF.
//
// Provides image loading, text recognition (OCR behind the `ocr` feature, or
// replayed observations), page geometry and text fitting, PDF assembly with
// an invisible text layer, and reading the result back for verification.

pub mod image;
pub mod layout;
pub mod pdf;
pub mod pipeline;
pub mod scan;

// Re-export the primary types so callers can use `scanlayer_document::Pipeline` etc.
pub use self::image::SourceImage;
pub use layout::{BuiltinMetrics, DrawOp, PagePlan, TextMeasurer};
pub use pdf::{PdfReader, PdfSummary, PdfWriter};
pub use pipeline::{Pipeline, RunReport};
pub use scan::{EntityTagger, HeuristicTagger, ReplayRecognizer, TextRecognizer, infer_title};

#[cfg(feature = "ocr")]
pub use scan::{OcrConfig, OcrEngine};
