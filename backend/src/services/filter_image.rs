//! Filter image analysis service.
//!
//! Samples two square windows centred on the image: an inner window of
//! half-width `r = floor(0.1 * min(width, height))` and an outer window of
//! half-width `2r`. The outer window *contains* the inner one; it is not an
//! annulus. The scattering index compares their mean luma, and the channel
//! ratios are taken over the inner window alone.
//!
//! Luma is rounded to an 8-bit gray level per pixel before averaging, as a
//! grayscale conversion of the photograph would store it.

use log::debug;

use crate::api::{ImageAnalysisRequest, ImageAnalysisResult};
use crate::error::{ImageError, ImageResult};

/// Inner window half-width as a fraction of the shorter image side.
pub const INNER_RADIUS_FRACTION: f64 = 0.1;

/// ITU-R BT.601 luma weights for R, G, B.
pub const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// 8-bit gray level of one pixel.
pub fn luma(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb;
    let y = LUMA_WEIGHTS[0] * r as f64 + LUMA_WEIGHTS[1] * g as f64 + LUMA_WEIGHTS[2] * b as f64;
    y.round().clamp(0.0, 255.0) as u8
}

/// Half-open pixel window `[x0, x1) × [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingWindow {
    pub x0: u32,
    pub x1: u32,
    pub y0: u32,
    pub y1: u32,
}

impl SamplingWindow {
    /// Window of half-width `half` around `(cx, cy)`, if it stays inside `width × height`.
    fn around(cx: u32, cy: u32, half: u32, width: u32, height: u32) -> Option<Self> {
        let window = Self {
            x0: cx.checked_sub(half)?,
            x1: cx.checked_add(half)?,
            y0: cy.checked_sub(half)?,
            y1: cy.checked_add(half)?,
        };
        (window.x1 <= width && window.y1 <= height).then_some(window)
    }

    pub fn pixel_count(&self) -> u64 {
        (self.x1 - self.x0) as u64 * (self.y1 - self.y0) as u64
    }
}

/// Where the two windows sit for a given image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingGeometry {
    pub center_x: u32,
    pub center_y: u32,
    pub inner_radius: u32,
    pub center_window: SamplingWindow,
    pub outer_window: SamplingWindow,
}

/// Place the sampling windows for a `width × height` image.
///
/// # Errors
/// `ImageError::ImageTooSmall` when the inner radius rounds down to zero or a
/// window would leave the image. Windows are never clamped.
pub fn sampling_geometry(width: u32, height: u32) -> ImageResult<SamplingGeometry> {
    let too_small = |reason: String| ImageError::ImageTooSmall {
        width,
        height,
        reason,
    };

    let shorter = width.min(height);
    let inner_radius = (shorter as f64 * INNER_RADIUS_FRACTION).floor() as u32;
    if inner_radius == 0 {
        return Err(too_small(format!(
            "shorter side {} px gives a zero inner radius",
            shorter
        )));
    }

    let center_x = width / 2;
    let center_y = height / 2;
    let center_window = SamplingWindow::around(center_x, center_y, inner_radius, width, height)
        .ok_or_else(|| too_small("center window exceeds the image".to_string()))?;
    let outer_window = SamplingWindow::around(center_x, center_y, 2 * inner_radius, width, height)
        .ok_or_else(|| too_small("outer window exceeds the image".to_string()))?;

    Ok(SamplingGeometry {
        center_x,
        center_y,
        inner_radius,
        center_window,
        outer_window,
    })
}

#[derive(Debug, Default)]
struct RegionSums {
    red: f64,
    green: f64,
    blue: f64,
    luma: f64,
    count: u64,
}

impl RegionSums {
    fn collect(image: &ImageAnalysisRequest, window: &SamplingWindow) -> Self {
        let mut sums = Self::default();
        for y in window.y0..window.y1 {
            for &rgb in image.row_span(y, window.x0, window.x1) {
                let [r, g, b] = rgb;
                sums.red += r as f64;
                sums.green += g as f64;
                sums.blue += b as f64;
                sums.luma += luma(rgb) as f64;
            }
        }
        sums.count = window.pixel_count();
        sums
    }

    fn mean(&self, sum: f64) -> f64 {
        sum / self.count as f64
    }
}

fn nonzero(value: f64, denominator: &'static str) -> ImageResult<f64> {
    if value == 0.0 {
        Err(ImageError::EmptyRegion { denominator })
    } else {
        Ok(value)
    }
}

/// Compute the scattering index and center-window channel ratios.
///
/// # Errors
/// `ImageTooSmall` (see [`sampling_geometry`]) or `EmptyRegion` when the center
/// luma, green or blue mean is zero.
pub fn analyze(image: &ImageAnalysisRequest) -> ImageResult<ImageAnalysisResult> {
    let geometry = sampling_geometry(image.width(), image.height())?;

    let center = RegionSums::collect(image, &geometry.center_window);
    let outer = RegionSums::collect(image, &geometry.outer_window);

    let center_luma = nonzero(center.mean(center.luma), "luma")?;
    let mean_r = center.mean(center.red);
    let mean_g = nonzero(center.mean(center.green), "green")?;
    let mean_b = nonzero(center.mean(center.blue), "blue")?;

    let result = ImageAnalysisResult {
        scattering_index: outer.mean(outer.luma) / center_luma,
        rg_ratio: mean_r / mean_g,
        gb_ratio: mean_g / mean_b,
        rb_ratio: mean_r / mean_b,
    };

    debug!(
        "Analyzed {}x{} image (r={}): scattering={:.4} R/G={:.4} G/B={:.4} R/B={:.4}",
        image.width(),
        image.height(),
        geometry.inner_radius,
        result.scattering_index,
        result.rg_ratio,
        result.gb_ratio,
        result.rb_ratio
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn black_with_white_square(size: u32, square: u32) -> ImageAnalysisRequest {
        let mut img = ImageAnalysisRequest::uniform(size, size, [0, 0, 0]);
        let start = size / 2 - square / 2;
        for y in start..start + square {
            for x in start..start + square {
                img.set_pixel(x, y, [255, 255, 255]);
            }
        }
        img
    }

    #[test]
    fn test_geometry_for_square_image() {
        let g = sampling_geometry(100, 100).unwrap();
        assert_eq!(g.inner_radius, 10);
        assert_eq!((g.center_x, g.center_y), (50, 50));
        assert_eq!(
            g.center_window,
            SamplingWindow { x0: 40, x1: 60, y0: 40, y1: 60 }
        );
        assert_eq!(
            g.outer_window,
            SamplingWindow { x0: 30, x1: 70, y0: 30, y1: 70 }
        );
        assert_eq!(g.outer_window.pixel_count(), 4 * g.center_window.pixel_count());
    }

    #[test]
    fn test_geometry_for_wide_odd_image() {
        let g = sampling_geometry(201, 57).unwrap();
        assert_eq!(g.inner_radius, 5);
        assert_eq!((g.center_x, g.center_y), (100, 28));
        assert_eq!(
            g.outer_window,
            SamplingWindow { x0: 90, x1: 110, y0: 18, y1: 38 }
        );
    }

    #[test]
    fn test_tiny_image_is_rejected() {
        let err = sampling_geometry(9, 400).unwrap_err();
        assert!(matches!(err, ImageError::ImageTooSmall { width: 9, height: 400, .. }));
        assert!(sampling_geometry(0, 0).is_err());
        assert!(sampling_geometry(10, 10).is_ok());
    }

    #[test]
    fn test_uniform_gray_is_neutral() {
        let result = analyze(&ImageAnalysisRequest::uniform(64, 48, [128, 128, 128])).unwrap();
        assert!((result.scattering_index - 1.0).abs() < TOL);
        assert!((result.rg_ratio - 1.0).abs() < TOL);
        assert!((result.gb_ratio - 1.0).abs() < TOL);
        assert!((result.rb_ratio - 1.0).abs() < TOL);
    }

    #[test]
    fn test_uniform_color_ratios() {
        let result = analyze(&ImageAnalysisRequest::uniform(50, 50, [200, 100, 50])).unwrap();
        assert!((result.rg_ratio - 2.0).abs() < TOL);
        assert!((result.gb_ratio - 2.0).abs() < TOL);
        assert!((result.rb_ratio - 4.0).abs() < TOL);
        assert!((result.scattering_index - 1.0).abs() < TOL);
    }

    #[test]
    fn test_centered_white_square_uses_inclusive_outer_window() {
        // The same 100 white pixels are averaged over 400 px (center) and 1600 px (outer).
        let result = analyze(&black_with_white_square(100, 10)).unwrap();
        assert!((result.scattering_index - 0.25).abs() < TOL);
        assert!(result.scattering_index < 1.0);
        assert!((result.rg_ratio - 1.0).abs() < TOL);
    }

    #[test]
    fn test_halo_outside_center_raises_index() {
        let mut img = ImageAnalysisRequest::uniform(100, 100, [100, 100, 100]);
        for y in 30..70 {
            for x in 30..70 {
                let inside_center = (40..60).contains(&x) && (40..60).contains(&y);
                if !inside_center {
                    img.set_pixel(x, y, [200, 200, 200]);
                }
            }
        }
        let result = analyze(&img).unwrap();
        // (400 * 100 + 1200 * 200) / 1600 / 100
        assert!((result.scattering_index - 1.75).abs() < 1e-9);
    }

    #[test]
    fn test_luma_rounds_to_gray_level() {
        assert_eq!(luma([0, 0, 0]), 0);
        assert_eq!(luma([255, 255, 255]), 255);
        assert_eq!(luma([128, 128, 128]), 128);
        // 124.2 and 124.254
        assert_eq!(luma([200, 100, 50]), 124);
        assert_eq!(luma([201, 99, 53]), 124);
    }

    #[test]
    fn test_equal_gray_levels_give_unit_scattering() {
        let mut img = ImageAnalysisRequest::uniform(100, 100, [200, 100, 50]);
        for y in 40..60 {
            for x in 40..60 {
                img.set_pixel(x, y, [201, 99, 53]);
            }
        }
        let result = analyze(&img).unwrap();
        assert_eq!(result.scattering_index, 1.0);
        assert!((result.rg_ratio - 201.0 / 99.0).abs() < TOL);
    }

    #[test]
    fn test_all_black_is_empty_region() {
        let err = analyze(&ImageAnalysisRequest::uniform(100, 100, [0, 0, 0])).unwrap_err();
        assert!(matches!(err, ImageError::EmptyRegion { denominator: "luma" }));
    }

    #[test]
    fn test_missing_blue_is_empty_region() {
        let err = analyze(&ImageAnalysisRequest::uniform(40, 40, [200, 120, 0])).unwrap_err();
        assert!(matches!(err, ImageError::EmptyRegion { denominator: "blue" }));
    }
}
