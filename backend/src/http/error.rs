//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::error::Error as _;

use crate::error::{GeometryError, ImageError};

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (validation error)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Solar geometry failure
    Geometry(GeometryError),
    /// Image decode or analysis failure
    Image(ImageError),
}

fn geometry_status(err: &GeometryError) -> StatusCode {
    match err {
        GeometryError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        GeometryError::SunBelowHorizon { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        GeometryError::DataUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn image_status(err: &ImageError) -> StatusCode {
    match err {
        ImageError::DecodeFailed { .. } => StatusCode::BAD_REQUEST,
        ImageError::ImageTooSmall { .. } | ImageError::EmptyRegion { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn with_source(mut error: ApiError, source: Option<&(dyn std::error::Error + 'static)>) -> ApiError {
    if let Some(source) = source {
        error = error.with_details(source.to_string());
    }
    error
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("BAD_REQUEST", msg),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Geometry(e) => (
                geometry_status(&e),
                with_source(ApiError::new(e.code(), e.to_string()), e.source()),
            ),
            AppError::Image(e) => (
                image_status(&e),
                with_source(ApiError::new(e.code(), e.to_string()), e.source()),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<GeometryError> for AppError {
    fn from(err: GeometryError) -> Self {
        AppError::Geometry(err)
    }
}

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        AppError::Image(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            geometry_status(&GeometryError::invalid_input("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            geometry_status(&GeometryError::SunBelowHorizon { altitude_deg: -1.0 }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            geometry_status(&GeometryError::data_unavailable("x")),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(image_status(&ImageError::decode("x")), StatusCode::BAD_REQUEST);
        assert_eq!(
            image_status(&ImageError::EmptyRegion { denominator: "luma" }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_response_status() {
        let response = AppError::from(GeometryError::SunBelowHorizon { altitude_deg: -4.0 })
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
