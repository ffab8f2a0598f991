// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR (Optical Character Recognition) module for Scanlayer.
//
// Detects and recognises text lines using the `ocrs` crate, a pure-Rust OCR
// engine backed by neural network models executed via `rten`. Each line is
// reported with its bounding box normalized to the image size.
//
// # Feature Gate
//
// This module is only available when the `ocr` feature is enabled:
//
// ```toml
// scanlayer-document = { path = "crates/scanlayer-document", features = ["ocr"] }
// ```
//
// # Model Setup
//
// The OCR engine requires two model files:
//
// - **Detection model** (`text-detection.rten`) — locates text regions in the image.
// - **Recognition model** (`text-recognition.rten`) — decodes characters from detected regions.
//
// Running the `ocrs` CLI once downloads both into `~/.cache/ocrs/`:
//   ```sh
//   cargo install ocrs-cli
//   ocrs some-image.png
//   ```
//
// The default directory is `$XDG_CACHE_HOME/ocrs` (typically `~/.cache/ocrs`).

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use ocrs::{ImageSource, OcrEngine as OcrsEngine, OcrEngineParams, TextItem};
use rten::Model;
use scanlayer_core::error::{Result, ScanlayerError};
use scanlayer_core::{BoxOrigin, Rect, TextObservation};
use tracing::{debug, info, instrument};

use crate::image::SourceImage;
use crate::scan::recognizer::TextRecognizer;

/// Default directory for cached OCR model files.
///
/// Follows the XDG Base Directory specification: `$XDG_CACHE_HOME/ocrs`, falling
/// back to `~/.cache/ocrs` when `XDG_CACHE_HOME` is unset.
fn default_model_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("ocrs")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".cache").join("ocrs")
    } else {
        PathBuf::from("ocrs-models")
    }
}

const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// Configuration for constructing an [`OcrEngine`].
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Path to the text-detection model file (`.rten`).
    pub detection_model_path: PathBuf,
    /// Path to the text-recognition model file (`.rten`).
    pub recognition_model_path: PathBuf,
}

impl Default for OcrConfig {
    /// Returns a config pointing at the default model cache directory.
    fn default() -> Self {
        Self::from_dir(default_model_dir())
    }
}

impl OcrConfig {
    /// Expects `dir` to contain `text-detection.rten` and `text-recognition.rten`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            detection_model_path: dir.join(DETECTION_MODEL_FILENAME),
            recognition_model_path: dir.join(RECOGNITION_MODEL_FILENAME),
        }
    }

    /// Verify that both model files exist.
    pub fn validate(&self) -> Result<()> {
        for (kind, path) in [
            ("detection", &self.detection_model_path),
            ("recognition", &self.recognition_model_path),
        ] {
            if !path.exists() {
                return Err(ScanlayerError::Recognition(format!(
                    "{kind} model not found at {}; run `ocrs` once to download models",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// Line-level OCR engine.
///
/// Models are loaded on the first recognition, so a run that fails earlier
/// (for example on an unreadable input image) never touches them.
///
/// **Important:** `ocrs` and `rten` must be compiled in release mode. Debug
/// builds are 10-100x slower.
pub struct OcrEngine {
    config: OcrConfig,
    engine: RefCell<Option<OcrsEngine>>,
}

impl OcrEngine {
    pub fn new(config: OcrConfig) -> Self {
        Self {
            config,
            engine: RefCell::new(None),
        }
    }

    /// Models from the default cache directory.
    pub fn with_defaults() -> Self {
        Self::new(OcrConfig::default())
    }

    /// Models from a specific directory.
    pub fn from_model_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(OcrConfig::from_dir(dir))
    }
}

/// Load both models named in `config`.
#[instrument(skip_all, fields(
    detection = %config.detection_model_path.display(),
    recognition = %config.recognition_model_path.display(),
))]
fn load_engine(config: &OcrConfig) -> Result<OcrsEngine> {
    config.validate()?;

    info!("Loading OCR detection model");
    let detection_model = Model::load_file(&config.detection_model_path).map_err(|err| {
        ScanlayerError::Recognition(format!(
            "failed to load detection model from {}: {}",
            config.detection_model_path.display(),
            err
        ))
    })?;

    info!("Loading OCR recognition model");
    let recognition_model = Model::load_file(&config.recognition_model_path).map_err(|err| {
        ScanlayerError::Recognition(format!(
            "failed to load recognition model from {}: {}",
            config.recognition_model_path.display(),
            err
        ))
    })?;

    let engine = OcrsEngine::new(OcrEngineParams {
        detection_model: Some(detection_model),
        recognition_model: Some(recognition_model),
        ..Default::default()
    })
    .map_err(|err| {
        ScanlayerError::Recognition(format!("failed to initialise OCR engine: {}", err))
    })?;

    info!("OCR engine initialised");
    Ok(engine)
}

impl TextRecognizer for OcrEngine {
    /// Detect words, group them into lines, and recognise each line.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    fn recognize(&self, image: &SourceImage) -> Result<Vec<TextObservation>> {
        let mut slot = self.engine.borrow_mut();
        let engine = match &mut *slot {
            Some(engine) => engine,
            empty => empty.insert(load_engine(&self.config)?),
        };

        let rgb = image.as_dynamic().to_rgb8();
        let (width, height) = rgb.dimensions();

        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|err| {
            ScanlayerError::Recognition(format!(
                "failed to create image source ({}x{}): {}",
                width, height, err
            ))
        })?;

        let input = engine.prepare_input(source).map_err(|err| {
            ScanlayerError::Recognition(format!("OCR preprocessing failed: {}", err))
        })?;

        let word_rects = engine.detect_words(&input).map_err(|err| {
            ScanlayerError::Recognition(format!("word detection failed: {}", err))
        })?;
        debug!(word_count = word_rects.len(), "Words detected");

        let line_rects = engine.find_text_lines(&input, &word_rects);
        debug!(line_count = line_rects.len(), "Text lines found");

        let line_texts = engine.recognize_text(&input, &line_rects).map_err(|err| {
            ScanlayerError::Recognition(format!("line recognition failed: {}", err))
        })?;

        let mut observations = Vec::with_capacity(line_texts.len());
        for line in line_texts.iter().flatten() {
            let text = line.to_string();
            if text.trim().is_empty() {
                continue;
            }
            let bounds = normalize_rect(&line.bounding_rect(), width, height);
            observations.push(TextObservation::new(text.trim(), bounds));
        }

        info!(lines = observations.len(), "OCR complete");
        Ok(observations)
    }

    /// `ocrs` reports raster coordinates, y growing downwards.
    fn box_origin(&self) -> BoxOrigin {
        BoxOrigin::TopLeft
    }
}

/// Convert a pixel rect into `[0, 1]` coordinates, clamped to the image.
fn normalize_rect(rect: &rten_imageproc::Rect, width: u32, height: u32) -> Rect {
    let w = f64::from(width);
    let h = f64::from(height);
    let left = (f64::from(rect.left()) / w).clamp(0.0, 1.0);
    let top = (f64::from(rect.top()) / h).clamp(0.0, 1.0);
    let right = (f64::from(rect.right()) / w).clamp(0.0, 1.0);
    let bottom = (f64::from(rect.bottom()) / h).clamp(0.0, 1.0);
    Rect::new(left, top, right - left, bottom - top)
}
