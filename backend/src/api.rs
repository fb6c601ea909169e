//! Public API surface for the Rust backend.
//!
//! This file holds the request/result value types of the three computations
//! and re-exports the view DTOs from the routes module. All types derive
//! Serialize/Deserialize for JSON serialization.

pub use crate::routes::defaults::ObservationDefaults;
pub use crate::routes::ratio_chart::RatioBar;
pub use crate::routes::ratio_chart::RatioChartData;
pub use crate::routes::report::FilterReport;
pub use crate::routes::report::GeometryOutcome;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult, ImageError, ImageResult};

pub use crate::models::ModifiedJulianDate;

/// Extinction coefficient (magnitudes per airmass) assumed when the caller gives none.
pub const DEFAULT_EXTINCTION_COEFFICIENT: f64 = 0.25;

/// Geographic location (latitude, longitude, elevation).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeographicLocation {
    /// Latitude in decimal degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in decimal degrees (-180 to 180), east positive
    pub longitude: f64,
    /// Elevation in meters above sea level (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_m: Option<f64>,
}

impl GeographicLocation {
    pub fn new(latitude: f64, longitude: f64, elevation_m: Option<f64>) -> GeometryResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeometryError::invalid_input(format!(
                "Latitude must be between -90 and 90 degrees, got {}",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeometryError::invalid_input(format!(
                "Longitude must be between -180 and 180 degrees, got {}",
                longitude
            )));
        }
        if let Some(elevation) = elevation_m {
            if !elevation.is_finite() {
                return Err(GeometryError::invalid_input("Elevation must be a finite number"));
            }
        }
        Ok(Self {
            latitude,
            longitude,
            elevation_m,
        })
    }

    /// Elevation in meters, sea level when unknown.
    pub fn elevation_or_sea_level(&self) -> f64 {
        self.elevation_m.unwrap_or(0.0)
    }
}

/// One observation to estimate the atmospheric dimming for.
///
/// Validated at construction and immutable afterwards; build a new one per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationRequest {
    location: GeographicLocation,
    timestamp_utc: DateTime<Utc>,
    extinction_coefficient: f64,
}

impl ObservationRequest {
    /// Create a request with the default extinction coefficient.
    ///
    /// # Errors
    /// `GeometryError::InvalidInput` when the coordinates are out of range.
    pub fn new(latitude: f64, longitude: f64, timestamp_utc: DateTime<Utc>) -> GeometryResult<Self> {
        Ok(Self {
            location: GeographicLocation::new(latitude, longitude, None)?,
            timestamp_utc,
            extinction_coefficient: DEFAULT_EXTINCTION_COEFFICIENT,
        })
    }

    /// Create a request from a textual timestamp (see [`crate::models::parse_utc_timestamp`]).
    pub fn parse(latitude: f64, longitude: f64, timestamp: &str) -> GeometryResult<Self> {
        let timestamp_utc = crate::models::parse_utc_timestamp(timestamp)?;
        Self::new(latitude, longitude, timestamp_utc)
    }

    /// Replace the assumed extinction coefficient.
    pub fn with_extinction_coefficient(mut self, k: f64) -> GeometryResult<Self> {
        if !k.is_finite() || k < 0.0 {
            return Err(GeometryError::invalid_input(format!(
                "Extinction coefficient must be a finite, non-negative number, got {}",
                k
            )));
        }
        self.extinction_coefficient = k;
        Ok(self)
    }

    /// Set the observer elevation above sea level.
    pub fn with_elevation(mut self, elevation_m: f64) -> GeometryResult<Self> {
        self.location = GeographicLocation::new(
            self.location.latitude,
            self.location.longitude,
            Some(elevation_m),
        )?;
        Ok(self)
    }

    pub fn location(&self) -> &GeographicLocation {
        &self.location
    }

    pub fn latitude(&self) -> f64 {
        self.location.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.location.longitude
    }

    pub fn timestamp_utc(&self) -> DateTime<Utc> {
        self.timestamp_utc
    }

    pub fn extinction_coefficient(&self) -> f64 {
        self.extinction_coefficient
    }
}

/// Sun altitude and the dimming it implies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarGeometryResult {
    /// Apparent (refraction-corrected) altitude of the sun
    pub altitude_deg: qtty::Degrees,
    /// Airmass approximation, secant of the zenith angle
    pub secant_z: f64,
    /// Predicted brightness loss in magnitudes, k * sec(Z)
    pub predicted_delta_m: f64,
}

/// R_corr verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorDiagnosis {
    pub r_corr: f64,
    /// True when `r_corr` is strictly below `threshold`
    pub is_anomalous: bool,
    pub threshold: f64,
    pub verdict: String,
}

/// Decoded RGB image handed to the filter analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAnalysisRequest {
    width: u32,
    height: u32,
    /// Row-major pixels, `width * height` entries
    pixels: Vec<[u8; 3]>,
}

impl ImageAnalysisRequest {
    /// Wrap a row-major RGB buffer.
    ///
    /// # Errors
    /// `ImageError::DecodeFailed` when the buffer length does not match the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> ImageResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ImageError::decode(format!(
                "pixel buffer holds {} pixels, {}x{} needs {}",
                pixels.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image of a single color.
    pub fn uniform(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        Self {
            width,
            height,
            pixels: vec![rgb; width as usize * height as usize],
        }
    }

    pub fn from_rgb_image(image: &image::RgbImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.pixels().map(|p| p.0).collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Pixel at column `x`, row `y`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Overwrite the pixel at `(x, y)`. Returns `false` and leaves the image
    /// untouched when the position is outside it.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.pixels[idx] = rgb;
                true
            }
            None => false,
        }
    }

    /// Row `y` restricted to columns `[x0, x1)`; callers pass a window inside the image.
    pub(crate) fn row_span(&self, y: u32, x0: u32, x1: u32) -> &[[u8; 3]] {
        let start = y as usize * self.width as usize;
        &self.pixels[start + x0 as usize..start + x1 as usize]
    }
}

/// Scattering index and center-region channel ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysisResult {
    /// Outer-window mean luma over center-window mean luma
    pub scattering_index: f64,
    pub rg_ratio: f64,
    pub gb_ratio: f64,
    pub rb_ratio: f64,
}
