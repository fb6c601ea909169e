//! Data Transfer Objects for the HTTP API.
//!
//! Request bodies are validated into the library value types; response bodies
//! flatten the library results and add request context.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    ColorDiagnosis, FilterReport, GeometryOutcome, ImageAnalysisResult, ObservationDefaults,
    RatioChartData, SolarGeometryResult,
};

use crate::api::ObservationRequest;
use crate::error::GeometryResult;

/// Observation as sent by the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationDto {
    pub latitude: f64,
    pub longitude: f64,
    /// RFC 3339, or `YYYY-MM-DD HH:MM[:SS]` read as UTC
    pub timestamp: String,
    #[serde(default)]
    pub extinction_coefficient: Option<f64>,
    #[serde(default)]
    pub elevation_m: Option<f64>,
}

impl ObservationDto {
    /// Validate into an [`ObservationRequest`], using `default_k` when no coefficient is given.
    pub fn into_request(&self, default_k: f64) -> GeometryResult<ObservationRequest> {
        let mut request = ObservationRequest::parse(self.latitude, self.longitude, &self.timestamp)?
            .with_extinction_coefficient(self.extinction_coefficient.unwrap_or(default_k))?;
        if let Some(elevation) = self.elevation_m {
            request = request.with_elevation(elevation)?;
        }
        Ok(request)
    }
}

/// Solar geometry response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarGeometryResponse {
    #[serde(flatten)]
    pub result: SolarGeometryResult,
    pub extinction_coefficient: f64,
    pub observation_mjd: f64,
}

/// Request body for the color diagnosis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorDiagnosisRequest {
    pub r_corr: f64,
}

/// Request body for the combined report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(flatten)]
    pub observation: ObservationDto,
    #[serde(default = "default_r_corr")]
    pub r_corr: f64,
}

fn default_r_corr() -> f64 {
    1.0
}

/// Image analysis response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAnalysisResponse {
    pub width: u32,
    pub height: u32,
    #[serde(flatten)]
    pub result: ImageAnalysisResult,
    pub chart: RatioChartData,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub ephemeris: String,
}
