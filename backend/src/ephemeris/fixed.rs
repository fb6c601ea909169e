//! In-memory ephemeris with a constant solar altitude, for unit testing and local development.

use chrono::{DateTime, Utc};

use super::{Body, Ephemeris};
use crate::api::GeographicLocation;
use crate::error::{GeometryError, GeometryResult};

/// Reports the same sun altitude for every observer and instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedEphemeris {
    sun_altitude: qtty::Degrees,
}

const FIXED_BODIES: [Body; 2] = [Body::Sun, Body::Earth];

impl FixedEphemeris {
    pub fn new(sun_altitude_deg: f64) -> Self {
        Self {
            sun_altitude: qtty::Degrees::new(sun_altitude_deg),
        }
    }
}

impl Ephemeris for FixedEphemeris {
    fn bodies(&self) -> &[Body] {
        &FIXED_BODIES
    }

    fn apparent_altitude(
        &self,
        body: Body,
        _observer: &GeographicLocation,
        _instant: DateTime<Utc>,
    ) -> GeometryResult<qtty::Degrees> {
        match body {
            Body::Sun => Ok(self.sun_altitude),
            Body::Earth => Err(GeometryError::data_unavailable(
                "Altitude of 'earth' is not defined for a surface observer",
            )),
        }
    }
}
