// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Source image — the decoded raster a run starts from. Loaded once and only
// read afterwards.

use std::path::Path;

use image::DynamicImage;
use scanlayer_core::error::{Result, ScanlayerError};
use tracing::{info, instrument};

/// A decoded input image with non-zero dimensions.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
}

impl SourceImage {
    /// Load and decode an image from a file path.
    ///
    /// Any format enabled in the `image` crate is accepted.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|err| {
            ScanlayerError::InputLoad(format!("{}: {}", path.display(), err))
        })?;
        let source = Self::from_dynamic(img)?;
        info!(
            width = source.width(),
            height = source.height(),
            "Image loaded"
        );
        Ok(source)
    }

    /// Wrap an already-decoded `DynamicImage`, rejecting empty images.
    pub fn from_dynamic(image: DynamicImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ScanlayerError::InputLoad(format!(
                "image has no pixels ({}x{})",
                image.width(),
                image.height()
            )));
        }
        Ok(Self { image })
    }

    /// Width in pixels, always > 0.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels, always > 0.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn opens_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        RgbImage::from_pixel(40, 20, Rgb([255, 255, 255]))
            .save(&path)
            .unwrap();

        let source = SourceImage::open(&path).unwrap();
        assert_eq!((source.width(), source.height()), (40, 20));
    }

    #[test]
    fn undecodable_file_is_input_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let result = SourceImage::open(&path);
        assert!(matches!(result, Err(ScanlayerError::InputLoad(_))));
    }

    #[test]
    fn missing_file_is_input_load_error() {
        let result = SourceImage::open("/nonexistent/scan.png");
        assert!(matches!(result, Err(ScanlayerError::InputLoad(_))));
    }

    #[test]
    fn empty_image_is_rejected() {
        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 10));
        assert!(matches!(
            SourceImage::from_dynamic(empty),
            Err(ScanlayerError::InputLoad(_))
        ));
    }
}
