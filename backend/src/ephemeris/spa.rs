//! Solar ephemeris backed by the NREL Solar Position Algorithm.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use solar_positioning::{spa, time::DeltaT};

use super::{Body, Ephemeris};
use crate::api::GeographicLocation;
use crate::error::{GeometryError, GeometryResult};

/// Atmosphere used for the refraction correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereModel {
    /// Annual mean local pressure in hPa
    pub pressure_hpa: f64,
    /// Annual mean local temperature in °C
    pub temperature_celsius: f64,
}

impl Default for AtmosphereModel {
    fn default() -> Self {
        Self {
            pressure_hpa: 1013.25,
            temperature_celsius: 15.0,
        }
    }
}

impl AtmosphereModel {
    pub fn validate(&self) -> GeometryResult<()> {
        if !self.pressure_hpa.is_finite() || self.pressure_hpa <= 0.0 || self.pressure_hpa > 5000.0 {
            return Err(GeometryError::data_unavailable(format!(
                "Atmospheric pressure must be within (0, 5000] hPa, got {}",
                self.pressure_hpa
            )));
        }
        if !(-273.15..=100.0).contains(&self.temperature_celsius) {
            return Err(GeometryError::data_unavailable(format!(
                "Atmospheric temperature must be within [-273.15, 100] °C, got {}",
                self.temperature_celsius
            )));
        }
        Ok(())
    }
}

/// SPA solar ephemeris. Carries the Sun; the Earth is the observer's body.
#[derive(Debug, Clone)]
pub struct SpaEphemeris {
    atmosphere: AtmosphereModel,
}

const SPA_BODIES: [Body; 2] = [Body::Sun, Body::Earth];

impl SpaEphemeris {
    pub fn new(atmosphere: AtmosphereModel) -> GeometryResult<Self> {
        atmosphere.validate()?;
        Ok(Self { atmosphere })
    }

    pub fn atmosphere(&self) -> AtmosphereModel {
        self.atmosphere
    }
}

impl Ephemeris for SpaEphemeris {
    fn bodies(&self) -> &[Body] {
        &SPA_BODIES
    }

    fn apparent_altitude(
        &self,
        body: Body,
        observer: &GeographicLocation,
        instant: DateTime<Utc>,
    ) -> GeometryResult<qtty::Degrees> {
        if body != Body::Sun {
            return Err(GeometryError::data_unavailable(format!(
                "Altitude of '{}' is not defined for a surface observer",
                body
            )));
        }

        let delta_t = DeltaT::estimate_from_date(instant.year(), instant.month()).map_err(|e| {
            GeometryError::data_unavailable_with_source(
                format!("No Delta T estimate for {}", instant.format("%Y-%m")),
                e,
            )
        })?;

        let position = spa::solar_position(
            instant,
            observer.latitude,
            observer.longitude,
            observer.elevation_or_sea_level(),
            delta_t,
            self.atmosphere.pressure_hpa,
            self.atmosphere.temperature_celsius,
        )
        .map_err(|e| GeometryError::invalid_input_with_source("Solar position rejected input", e))?;

        Ok(qtty::Degrees::new(position.elevation_angle()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::error::Error as _;

    #[test]
    fn test_atmosphere_validation() {
        assert!(AtmosphereModel::default().validate().is_ok());
        let bad = AtmosphereModel {
            pressure_hpa: 0.0,
            ..AtmosphereModel::default()
        };
        assert!(matches!(
            SpaEphemeris::new(bad).unwrap_err(),
            GeometryError::DataUnavailable { .. }
        ));
        let cold = AtmosphereModel {
            temperature_celsius: -300.0,
            ..AtmosphereModel::default()
        };
        assert!(cold.validate().is_err());
    }

    #[test]
    fn test_earth_altitude_unavailable() {
        let eph = SpaEphemeris::new(AtmosphereModel::default()).unwrap();
        let site = GeographicLocation::new(0.0, 0.0, None).unwrap();
        let t = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let err = eph.apparent_altitude(Body::Earth, &site, t).unwrap_err();
        assert!(matches!(err, GeometryError::DataUnavailable { .. }));
    }

    #[test]
    fn test_greenwich_summer_solstice_noon() {
        // Upper culmination at 51.48°N near the June solstice: 90 - 51.48 + 23.44 ≈ 61.96°
        let eph = SpaEphemeris::new(AtmosphereModel::default()).unwrap();
        let site = GeographicLocation::new(51.4769, 0.0, Some(0.0)).unwrap();
        let t = Utc.with_ymd_and_hms(2024, 6, 21, 12, 2, 0).unwrap();
        let alt = eph.apparent_altitude(Body::Sun, &site, t).unwrap();
        assert!(
            (alt.value() - 61.96).abs() < 0.3,
            "unexpected altitude {}",
            alt.value()
        );
    }

    #[test]
    fn test_korea_default_observation_is_night() {
        // 14:00 UTC is 23:00 KST
        let eph = SpaEphemeris::new(AtmosphereModel::default()).unwrap();
        let site = GeographicLocation::new(35.6351, 127.4263, None).unwrap();
        let t = Utc.with_ymd_and_hms(2025, 6, 18, 14, 0, 0).unwrap();
        let alt = eph.apparent_altitude(Body::Sun, &site, t).unwrap();
        assert!(alt.value() < -10.0, "unexpected altitude {}", alt.value());
    }

    #[test]
    fn test_instant_beyond_delta_t_model_is_unavailable() {
        let eph = SpaEphemeris::new(AtmosphereModel::default()).unwrap();
        let site = GeographicLocation::new(35.6351, 127.4263, None).unwrap();
        let t = Utc.with_ymd_and_hms(3500, 6, 18, 3, 0, 0).unwrap();
        let err = eph.apparent_altitude(Body::Sun, &site, t).unwrap_err();
        assert!(matches!(err, GeometryError::DataUnavailable { .. }));
        assert!(err.to_string().contains("3500-06"));
        assert!(err.source().is_some());
    }
}
