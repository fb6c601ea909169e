//! Single-screen observation report.
//!
//! Runs the geometry estimate and the R_corr verdict side by side. A failed
//! estimate (sun down, bad timestamp, missing ephemeris data) is reported in
//! the geometry section and does not suppress the color verdict.

use crate::api::{FilterReport, GeometryOutcome, ObservationRequest};
use crate::ephemeris::Ephemeris;
use crate::error::GeometryResult;
use crate::models::ModifiedJulianDate;

use super::color_diagnostics::diagnose_with_threshold;
use super::solar_geometry::estimate_with;

/// Build a report for `request` and `r_corr` against `ephemeris`.
///
/// `request` is the outcome of validating the observation; a rejected
/// observation becomes a failed geometry section.
pub fn build_report(
    ephemeris: &dyn Ephemeris,
    request: GeometryResult<ObservationRequest>,
    r_corr: f64,
    r_corr_threshold: f64,
) -> FilterReport {
    let estimated = request.and_then(|req| {
        let result = estimate_with(ephemeris, &req)?;
        Ok((req, result))
    });
    let geometry = match estimated {
        Ok((req, result)) => GeometryOutcome::Computed {
            result,
            observation_mjd: ModifiedJulianDate::from_datetime(req.timestamp_utc()).value(),
        },
        Err(e) => GeometryOutcome::from(&e),
    };

    FilterReport {
        geometry,
        color: diagnose_with_threshold(r_corr, r_corr_threshold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::FixedEphemeris;
    use chrono::{TimeZone, Utc};

    fn request() -> ObservationRequest {
        let t = Utc.with_ymd_and_hms(2025, 6, 18, 12, 0, 0).unwrap();
        ObservationRequest::new(35.6351, 127.4263, t).unwrap()
    }

    #[test]
    fn test_report_with_sun_up() {
        let report = build_report(&FixedEphemeris::new(30.0), Ok(request()), 1.0, 0.95);
        match report.geometry {
            GeometryOutcome::Computed { result, observation_mjd } => {
                assert!((result.predicted_delta_m - 0.5).abs() < 1e-12);
                assert!((observation_mjd - 60844.5).abs() < 1e-9);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(!report.color.is_anomalous);
    }

    #[test]
    fn test_geometry_failure_keeps_color_verdict() {
        let report = build_report(&FixedEphemeris::new(-5.0), Ok(request()), 0.9, 0.95);
        assert!(matches!(
            report.geometry,
            GeometryOutcome::Failed { ref code, .. } if code == "SUN_BELOW_HORIZON"
        ));
        assert!(report.color.is_anomalous);
    }

    #[test]
    fn test_rejected_observation_keeps_color_verdict() {
        let rejected = ObservationRequest::parse(35.6351, 127.4263, "noon-ish");
        let report = build_report(&FixedEphemeris::new(30.0), rejected, 0.9, 0.95);
        assert!(matches!(
            report.geometry,
            GeometryOutcome::Failed { ref code, .. } if code == "INVALID_INPUT"
        ));
        assert!(report.color.is_anomalous);
    }
}
