// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning — text recognition (OCR or replayed observations) and title
// inference from the recognized text.

pub mod recognizer;
pub mod title;

#[cfg(feature = "ocr")]
pub mod ocr;

pub use recognizer::{ReplayRecognizer, TextRecognizer, save_observations};
pub use title::{EntityKind, EntityTagger, HeuristicTagger, TaggedSpan, infer_title};

#[cfg(feature = "ocr")]
pub use ocr::{OcrConfig, OcrEngine};
