//! Decoding of uploaded sun photographs.

use image::ImageFormat;
use log::debug;

use crate::api::ImageAnalysisRequest;
use crate::error::{ImageError, ImageResult};

/// Upload formats accepted by [`decode_image`].
pub const SUPPORTED_FORMATS: [ImageFormat; 2] = [ImageFormat::Png, ImageFormat::Jpeg];

/// Decode PNG or JPEG bytes into 8-bit RGB pixels.
///
/// Alpha is dropped and grayscale is expanded to three equal channels.
///
/// # Errors
/// `ImageError::DecodeFailed` for empty input, an unrecognised or unsupported
/// container, or a corrupt stream.
pub fn decode_image(bytes: &[u8]) -> ImageResult<ImageAnalysisRequest> {
    if bytes.is_empty() {
        return Err(ImageError::decode("empty upload"));
    }

    let format = image::guess_format(bytes)?;
    if !SUPPORTED_FORMATS.contains(&format) {
        return Err(ImageError::decode(format!(
            "unsupported image format {:?}, expected PNG or JPEG",
            format
        )));
    }

    let decoded = image::load_from_memory_with_format(bytes, format)?;
    let rgb = decoded.to_rgb8();
    debug!(
        "Decoded {:?} upload of {} bytes into {}x{} RGB",
        format,
        bytes.len(),
        rgb.width(),
        rgb.height()
    );

    Ok(ImageAnalysisRequest::from_rgb_image(&rgb))
}
