//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for the computation.

use axum::{body::Bytes, extract::State, Json};
use tracing::{debug, warn};

use super::dto::{
    ColorDiagnosis, ColorDiagnosisRequest, FilterReport, HealthResponse, ImageAnalysisResponse,
    ObservationDefaults, ObservationDto, ReportRequest, SolarGeometryResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::ephemeris::Body;
use crate::models::ModifiedJulianDate;
use crate::routes::ratio_chart::build_ratio_chart;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the ephemeris answers.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let ephemeris = match state.ephemeris.body(Body::Sun.name()) {
        Ok(_) => "ready".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        ephemeris,
    }))
}

// =============================================================================
// Observation Form
// =============================================================================

/// GET /v1/defaults
///
/// Initial form values, with the configured extinction coefficient and threshold.
pub async fn get_defaults(State(state): State<AppState>) -> HandlerResult<ObservationDefaults> {
    Ok(Json(ObservationDefaults::with_policy(
        state.config.atmosphere.extinction_coefficient,
        state.config.diagnosis.r_corr_threshold,
    )))
}

/// POST /v1/solar-geometry
///
/// Sun altitude, airmass and predicted Δm for one observation.
pub async fn post_solar_geometry(
    State(state): State<AppState>,
    Json(body): Json<ObservationDto>,
) -> HandlerResult<SolarGeometryResponse> {
    let request = body.into_request(state.config.atmosphere.extinction_coefficient)?;
    let result = services::estimate_with(state.ephemeris.as_ref(), &request)?;

    Ok(Json(SolarGeometryResponse {
        result,
        extinction_coefficient: request.extinction_coefficient(),
        observation_mjd: ModifiedJulianDate::from_datetime(request.timestamp_utc()).value(),
    }))
}

/// POST /v1/color-diagnosis
///
/// R_corr verdict against the configured threshold.
pub async fn post_color_diagnosis(
    State(state): State<AppState>,
    Json(body): Json<ColorDiagnosisRequest>,
) -> HandlerResult<ColorDiagnosis> {
    if !body.r_corr.is_finite() {
        return Err(AppError::BadRequest("r_corr must be a finite number".to_string()));
    }
    Ok(Json(services::diagnose_with_threshold(
        body.r_corr,
        state.config.diagnosis.r_corr_threshold,
    )))
}

/// POST /v1/report
///
/// Geometry outcome and color verdict for one observation. A geometry failure,
/// including a rejected timestamp or coordinate, is reported inside the body;
/// only a non-finite `r_corr` fails the call.
pub async fn post_report(
    State(state): State<AppState>,
    Json(body): Json<ReportRequest>,
) -> HandlerResult<FilterReport> {
    if !body.r_corr.is_finite() {
        return Err(AppError::BadRequest("r_corr must be a finite number".to_string()));
    }
    let request = body
        .observation
        .into_request(state.config.atmosphere.extinction_coefficient);
    if let Err(e) = &request {
        debug!("Report observation rejected: {}", e);
    }

    Ok(Json(services::build_report(
        state.ephemeris.as_ref(),
        request,
        body.r_corr,
        state.config.diagnosis.r_corr_threshold,
    )))
}

// =============================================================================
// Image Analysis
// =============================================================================

/// POST /v1/image-analysis
///
/// Raw PNG or JPEG body. Returns the scattering index, channel ratios and the
/// ratio chart description.
pub async fn post_image_analysis(body: Bytes) -> HandlerResult<ImageAnalysisResponse> {
    debug!("Received {} byte image upload", body.len());

    // Decoding and pixel averaging are CPU-bound
    let response = tokio::task::spawn_blocking(move || {
        let image = services::decode_image(&body)?;
        let result = services::analyze(&image)?;
        Ok::<_, crate::error::ImageError>(ImageAnalysisResponse {
            width: image.width(),
            height: image.height(),
            chart: build_ratio_chart(&result),
            result,
        })
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
    .map_err(|e| {
        warn!("Image analysis rejected: {}", e);
        AppError::from(e)
    })?;

    Ok(Json(response))
}
