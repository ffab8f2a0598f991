// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Recognizer seam — anything that turns a source image into text
// observations. The `ocrs` engine implements it behind the `ocr` feature;
// `ReplayRecognizer` serves observations saved by an earlier run.

use std::path::Path;

use scanlayer_core::error::{Result, ScanlayerError};
use scanlayer_core::{BoxOrigin, ObservationSet, TextObservation};
use tracing::{info, instrument};

use crate::image::SourceImage;

/// Produces text observations for an image.
///
/// Recognition either returns the complete list or fails; partial results are
/// never exposed.
pub trait TextRecognizer {
    fn recognize(&self, image: &SourceImage) -> Result<Vec<TextObservation>>;

    /// Vertical origin of the normalized boxes this recognizer reports.
    fn box_origin(&self) -> BoxOrigin {
        BoxOrigin::BottomLeft
    }
}

/// Replays a fixed set of observations, ignoring the image.
#[derive(Debug, Clone, Default)]
pub struct ReplayRecognizer {
    set: ObservationSet,
}

impl ReplayRecognizer {
    pub fn new(set: ObservationSet) -> Self {
        Self { set }
    }

    /// Observations in bottom-left convention.
    pub fn from_observations(observations: Vec<TextObservation>) -> Self {
        Self::new(ObservationSet {
            origin: BoxOrigin::BottomLeft,
            observations,
        })
    }

    /// Load an observation set written by [`save_observations`].
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            ScanlayerError::Recognition(format!("failed to read {}: {}", path.display(), err))
        })?;
        let set: ObservationSet = serde_json::from_str(&raw).map_err(|err| {
            ScanlayerError::Recognition(format!("failed to parse {}: {}", path.display(), err))
        })?;
        info!(
            observations = set.observations.len(),
            origin = ?set.origin,
            "Loaded saved observations"
        );
        Ok(Self::new(set))
    }
}

impl TextRecognizer for ReplayRecognizer {
    fn recognize(&self, _image: &SourceImage) -> Result<Vec<TextObservation>> {
        Ok(self.set.observations.clone())
    }

    fn box_origin(&self) -> BoxOrigin {
        self.set.origin
    }
}

/// Write observations as pretty JSON so they can be replayed later.
pub fn save_observations(
    path: impl AsRef<Path>,
    origin: BoxOrigin,
    observations: &[TextObservation],
) -> Result<()> {
    let set = ObservationSet {
        origin,
        observations: observations.to_vec(),
    };
    let json = serde_json::to_string_pretty(&set)?;
    std::fs::write(path.as_ref(), json)?;
    info!(
        path = %path.as_ref().display(),
        observations = observations.len(),
        "Saved observations"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};
    use scanlayer_core::Rect;

    fn blank() -> SourceImage {
        SourceImage::from_dynamic(DynamicImage::ImageRgb8(RgbImage::new(4, 4))).unwrap()
    }

    #[test]
    fn saved_observations_replay_with_origin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("obs.json");

        let observations = vec![
            TextObservation::new("ACME Ltd", Rect::new(0.1, 0.05, 0.4, 0.04)),
            TextObservation::new("Total 42.00", Rect::new(0.6, 0.9, 0.3, 0.03)),
        ];
        save_observations(&path, BoxOrigin::TopLeft, &observations).unwrap();

        let replay = ReplayRecognizer::load(&path).unwrap();
        assert_eq!(replay.box_origin(), BoxOrigin::TopLeft);
        assert_eq!(replay.recognize(&blank()).unwrap(), observations);
    }

    #[test]
    fn unreadable_file_is_recognition_error() {
        let result = ReplayRecognizer::load("/nonexistent/observations.json");
        assert!(matches!(result, Err(ScanlayerError::Recognition(_))));
    }

    #[test]
    fn default_origin_is_bottom_left() {
        let replay = ReplayRecognizer::from_observations(Vec::new());
        assert_eq!(replay.box_origin(), BoxOrigin::BottomLeft);
        assert!(replay.recognize(&blank()).unwrap().is_empty());
    }
}
