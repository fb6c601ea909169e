//! Error types for the geometry and image computations.
//!
//! Every failure a computation can hit is a distinct variant so the calling
//! layer can tell a bad request from a night-time observation or a missing
//! ephemeris. Where an underlying library error exists it is kept as `source`.

/// Boxed error used as the cause of geometry failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for solar geometry operations
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Result type for image decoding and analysis
pub type ImageResult<T> = Result<T, ImageError>;

/// Error type for solar geometry estimation.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    /// Coordinates, timestamp or extinction coefficient rejected.
    #[error("Invalid observation input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The sun's apparent altitude is at or below the horizon; airmass is undefined.
    #[error("Sun is below the horizon (apparent altitude {altitude_deg:.2}°)")]
    SunBelowHorizon { altitude_deg: f64 },

    /// The ephemeris could not answer for this body or instant.
    #[error("Ephemeris data unavailable: {message}")]
    DataUnavailable {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl GeometryError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid input error carrying its cause.
    pub fn invalid_input_with_source(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::InvalidInput {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a data unavailable error.
    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::DataUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create a data unavailable error carrying its cause.
    pub fn data_unavailable_with_source(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::DataUnavailable {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::SunBelowHorizon { .. } => "SUN_BELOW_HORIZON",
            Self::DataUnavailable { .. } => "DATA_UNAVAILABLE",
        }
    }
}

/// Error type for image decoding and filter image analysis.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// Bytes could not be turned into RGB pixel data.
    #[error("Image decode failed: {message}")]
    DecodeFailed {
        message: String,
        #[source]
        source: Option<image::ImageError>,
    },

    /// The sampling windows do not fit inside the image.
    #[error("Image too small for analysis ({width}x{height}): {reason}")]
    ImageTooSmall {
        width: u32,
        height: u32,
        reason: String,
    },

    /// A mean used as a denominator is zero.
    #[error("Empty region: mean {denominator} in the center window is zero")]
    EmptyRegion { denominator: &'static str },
}

impl ImageError {
    /// Create a decode error without an underlying codec error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::DecodeFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DecodeFailed { .. } => "DECODE_FAILED",
            Self::ImageTooSmall { .. } => "IMAGE_TOO_SMALL",
            Self::EmptyRegion { .. } => "EMPTY_REGION",
        }
    }
}

impl From<image::ImageError> for ImageError {
    fn from(err: image::ImageError) -> Self {
        Self::DecodeFailed {
            message: err.to_string(),
            source: Some(err),
        }
    }
}
