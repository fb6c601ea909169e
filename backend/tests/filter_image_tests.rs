//! Filter image analysis on encoded uploads.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use ndfilter_diag::api::ImageAnalysisRequest;
use ndfilter_diag::error::ImageError;
use ndfilter_diag::routes::ratio_chart::build_ratio_chart;
use ndfilter_diag::services;

fn encode_png(img: &RgbImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Bright disk on a dim sky with a faint halo, roughly what a filtered sun shot looks like.
fn synthetic_sun(width: u32, height: u32) -> RgbImage {
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    RgbImage::from_fn(width, height, |x, y| {
        let d = ((x as f64 - cx).powi(2) + (y as f64 - cy).powi(2)).sqrt();
        if d < 12.0 {
            Rgb([250, 210, 150])
        } else if d < 30.0 {
            Rgb([90, 70, 50])
        } else {
            Rgb([10, 10, 12])
        }
    })
}

#[test]
fn test_png_roundtrip_preserves_analysis() {
    let img = synthetic_sun(160, 120);
    let direct = services::analyze(&ImageAnalysisRequest::from_rgb_image(&img)).unwrap();

    let decoded = services::decode_image(&encode_png(&img)).unwrap();
    let via_png = services::analyze(&decoded).unwrap();

    assert_eq!(direct, via_png);
}

#[test]
fn test_synthetic_sun_metrics() {
    let result = services::analyze(&ImageAnalysisRequest::from_rgb_image(&synthetic_sun(160, 120)))
        .unwrap();
    // Outer window averages in the halo and sky, so it is darker than the disk.
    assert!(result.scattering_index < 1.0);
    assert!(result.scattering_index > 0.0);
    // Warm disk: red above green above blue.
    assert!(result.rg_ratio > 1.0);
    assert!(result.gb_ratio > 1.0);
    assert!((result.rb_ratio - result.rg_ratio * result.gb_ratio).abs() < 1e-12);
}

#[test]
fn test_uniform_gray_upload() {
    let img = RgbImage::from_pixel(100, 100, Rgb([128, 128, 128]));
    let result = services::analyze(&services::decode_image(&encode_png(&img)).unwrap()).unwrap();
    assert!((result.scattering_index - 1.0).abs() < 1e-12);
    assert!((result.rg_ratio - 1.0).abs() < 1e-12);
    assert!((result.gb_ratio - 1.0).abs() < 1e-12);
    assert!((result.rb_ratio - 1.0).abs() < 1e-12);
}

#[test]
fn test_black_upload_is_empty_region() {
    let img = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));
    let decoded = services::decode_image(&encode_png(&img)).unwrap();
    assert!(matches!(
        services::analyze(&decoded),
        Err(ImageError::EmptyRegion { .. })
    ));
}

#[test]
fn test_thumbnail_upload_is_too_small() {
    let img = RgbImage::from_pixel(8, 8, Rgb([200, 200, 200]));
    let decoded = services::decode_image(&encode_png(&img)).unwrap();
    assert!(matches!(
        services::analyze(&decoded),
        Err(ImageError::ImageTooSmall { width: 8, height: 8, .. })
    ));
}

#[test]
fn test_chart_from_upload() {
    let result = services::analyze(&ImageAnalysisRequest::from_rgb_image(&synthetic_sun(100, 100)))
        .unwrap();
    let chart = build_ratio_chart(&result);
    assert_eq!(chart.bars.len(), 3);
    assert_eq!(chart.bars[0].value, result.rg_ratio);
    assert_eq!(chart.bars[2].value, result.rb_ratio);
}
