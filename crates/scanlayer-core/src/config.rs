// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Run configuration.
//
// Every tunable of the layout pipeline lives here and is passed explicitly
// into the geometry and fitting stages.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanlayerError};
use crate::types::{FontFamily, TextMode};

/// Title used when no named entity is found in the recognized text.
pub const FALLBACK_TITLE: &str = "OCR Generated PDF";

/// Maximum page box. Larger images are scaled down to fit, smaller ones are
/// placed 1 pixel = 1 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLimits {
    pub max_width: f64,
    pub max_height: f64,
}

impl PageLimits {
    /// A4 portrait in points.
    pub const A4_PORTRAIT: Self = Self {
        max_width: 595.0,
        max_height: 842.0,
    };
}

impl Default for PageLimits {
    fn default() -> Self {
        Self::A4_PORTRAIT
    }
}

/// Parameters of the text fitting engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Font used to measure and draw the text layer.
    pub font: FontFamily,
    /// Size at which a run is measured before it is scaled into its box.
    pub reference_font_size: f64,
    /// Vertical compression `K` applied on top of the box-height fit.
    ///
    /// Layout height (ascent + descent) is larger than the ink a detector
    /// boxes, so an unscaled fit overshoots the detected region. To
    /// recalibrate for another font, render reference strings, measure the
    /// ink height and the layout height, and use their ratio.
    pub vertical_compression: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            font: FontFamily::Helvetica,
            reference_font_size: 12.0,
            vertical_compression: 0.7,
        }
    }
}

/// Complete configuration for one conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    pub page: PageLimits,
    pub fit: FitOptions,
    /// Paint mode of the text layer.
    pub text_mode: TextMode,
    /// Draw region outlines and print each region to stdout.
    pub debug: bool,
    /// `/Creator` entry of the info dictionary.
    pub creator: String,
    /// `/Subject` entry of the info dictionary.
    pub subject: String,
    /// Title used when inference finds nothing.
    pub fallback_title: String,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            page: PageLimits::default(),
            fit: FitOptions::default(),
            text_mode: TextMode::Invisible,
            debug: false,
            creator: "scanlayer".into(),
            subject: "Text extracted from image".into(),
            fallback_title: FALLBACK_TITLE.into(),
        }
    }
}

impl LayerConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            ScanlayerError::Config(format!("failed to read {}: {}", path.display(), err))
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the geometry and fitting stages cannot work with.
    pub fn validate(&self) -> Result<()> {
        positive("page.max_width", self.page.max_width)?;
        positive("page.max_height", self.page.max_height)?;
        positive("fit.reference_font_size", self.fit.reference_font_size)?;
        positive("fit.vertical_compression", self.fit.vertical_compression)?;
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ScanlayerError::Config(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}
