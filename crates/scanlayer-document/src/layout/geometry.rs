// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page geometry — derive the PDF page size from the image size.

use scanlayer_core::{PageGeometry, PageLimits};

/// Compute the page size for an image of `width_px` × `height_px`.
///
/// If the image exceeds `limits` in either direction it is scaled down by the
/// larger of the two overflow ratios, preserving the aspect ratio. Otherwise
/// one pixel maps to one point. Images are never scaled up.
///
/// Callers must reject zero dimensions first; [`SourceImage`] guarantees it.
///
/// [`SourceImage`]: crate::image::SourceImage
pub fn compute_page_geometry(width_px: u32, height_px: u32, limits: &PageLimits) -> PageGeometry {
    debug_assert!(width_px > 0 && height_px > 0, "image dimensions must be positive");

    let width = f64::from(width_px);
    let height = f64::from(height_px);
    let ratio = (width / limits.max_width).max(height / limits.max_height);

    if ratio > 1.0 {
        PageGeometry {
            width: width / ratio,
            height: height / ratio,
        }
    } else {
        PageGeometry { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A4: PageLimits = PageLimits::A4_PORTRAIT;

    #[test]
    fn small_images_map_one_to_one() {
        let page = compute_page_geometry(400, 300, &A4);
        assert_eq!(page.width, 400.0);
        assert_eq!(page.height, 300.0);

        let exact = compute_page_geometry(595, 842, &A4);
        assert_eq!((exact.width, exact.height), (595.0, 842.0));
    }

    #[test]
    fn large_images_keep_aspect_and_fit() {
        for &(w, h) in &[(1000u32, 1000u32), (2480, 3508), (4000, 600), (600, 5000), (596, 100)] {
            let page = compute_page_geometry(w, h, &A4);
            let image_aspect = f64::from(w) / f64::from(h);
            assert!((page.width / page.height - image_aspect).abs() < 1e-9, "{w}x{h}");
            assert!(page.width <= 595.0 + 1e-9, "{w}x{h} width {}", page.width);
            assert!(page.height <= 842.0 + 1e-9, "{w}x{h} height {}", page.height);
        }
    }

    #[test]
    fn square_image_is_bound_by_width() {
        // ratio = max(1000/595, 1000/842) = 1000/595, so width hits the limit.
        let page = compute_page_geometry(1000, 1000, &A4);
        assert!((page.width - 595.0).abs() < 1e-9);
        assert!((page.height - 595.0).abs() < 1e-9);
    }

    #[test]
    fn custom_limits_are_respected() {
        let limits = PageLimits {
            max_width: 612.0,
            max_height: 792.0,
        };
        let page = compute_page_geometry(1224, 1584, &limits);
        assert!((page.width - 612.0).abs() < 1e-9);
        assert!((page.height - 792.0).abs() < 1e-9);
    }
}
