//! Solar geometry estimation service.
//!
//! Turns an observation (site + UTC instant) into the sun's apparent altitude,
//! the airmass it implies and the brightness loss predicted by a fixed
//! extinction coefficient.

use log::{debug, warn};
use qtty::Degrees;

use crate::api::{ObservationRequest, SolarGeometryResult};
use crate::ephemeris::{get_ephemeris, Body, Ephemeris};
use crate::error::{GeometryError, GeometryResult};

/// Altitudes this close to the zenith are treated as exactly 90°.
pub const ZENITH_EPSILON_DEG: f64 = 1e-9;

/// Airmass approximation for a sun at `altitude`: `1 / cos(90° - alt)`.
///
/// # Errors
/// `GeometryError::SunBelowHorizon` for `alt <= 0`, where the secant is
/// negative or unbounded, and `InvalidInput` for non-finite or `> 90°` values.
pub fn secant_z(altitude: Degrees) -> GeometryResult<f64> {
    let alt = altitude.value();
    if !alt.is_finite() || alt > 90.0 + ZENITH_EPSILON_DEG {
        return Err(GeometryError::invalid_input(format!(
            "Altitude must be a finite angle up to 90°, got {}",
            alt
        )));
    }
    if alt <= 0.0 {
        return Err(GeometryError::SunBelowHorizon { altitude_deg: alt });
    }
    if (90.0 - alt).abs() <= ZENITH_EPSILON_DEG {
        return Ok(1.0);
    }

    let zenith_angle = Degrees::new(90.0 - alt);
    Ok(1.0 / zenith_angle.cos())
}

/// Predicted magnitude loss: `k * sec(Z)`.
pub fn predicted_delta_m(extinction_coefficient: f64, secant_z: f64) -> f64 {
    extinction_coefficient * secant_z
}

/// Estimate solar geometry for `request` against the process-wide ephemeris.
pub fn estimate(request: &ObservationRequest) -> GeometryResult<SolarGeometryResult> {
    let ephemeris = get_ephemeris()?;
    estimate_with(ephemeris.as_ref(), request)
}

/// Estimate solar geometry for `request` against an explicit ephemeris.
pub fn estimate_with(
    ephemeris: &dyn Ephemeris,
    request: &ObservationRequest,
) -> GeometryResult<SolarGeometryResult> {
    let sun = ephemeris.body(Body::Sun.name())?;
    let altitude = ephemeris.apparent_altitude(sun, request.location(), request.timestamp_utc())?;

    let secant = match secant_z(altitude) {
        Ok(secant) => secant,
        Err(e) => {
            warn!(
                "No airmass for lat={} lon={} at {}: {}",
                request.latitude(),
                request.longitude(),
                request.timestamp_utc(),
                e
            );
            return Err(e);
        }
    };
    let delta_m = predicted_delta_m(request.extinction_coefficient(), secant);

    debug!(
        "Solar geometry lat={} lon={} at {}: alt={:.3}° secZ={:.4} Δm={:.4} (k={})",
        request.latitude(),
        request.longitude(),
        request.timestamp_utc(),
        altitude.value(),
        secant,
        delta_m,
        request.extinction_coefficient()
    );

    Ok(SolarGeometryResult {
        altitude_deg: altitude,
        secant_z: secant,
        predicted_delta_m: delta_m,
    })
}
