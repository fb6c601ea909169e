//! Ephemeris data source for solar position queries.
//!
//! The geometry estimator only needs one answer from an ephemeris: the apparent
//! topocentric altitude of a body for an observer at an instant. The
//! [`Ephemeris`] trait captures that, keyed by body name.
//!
//! # Process-wide instance
//!
//! One ephemeris is shared by the whole process. It is built once, either
//! explicitly at startup through [`init_ephemeris`] / [`install_ephemeris`]
//! or lazily with default atmosphere settings on the first
//! [`get_ephemeris`] call, and never mutated afterwards, so concurrent
//! requests read it without locking.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  services::solar_geometry    │
//! └──────────────┬───────────────┘
//!                │ get_ephemeris()
//! ┌──────────────▼───────────────┐
//! │  dyn Ephemeris (OnceLock)    │
//! │  - SpaEphemeris (default)    │
//! │  - FixedEphemeris (testing)  │
//! └──────────────────────────────┘
//! ```

pub mod fixed;
pub mod spa;

pub use fixed::FixedEphemeris;
pub use spa::{AtmosphereModel, SpaEphemeris};

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};

use crate::api::GeographicLocation;
use crate::error::{GeometryError, GeometryResult};

/// Bodies an ephemeris can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    /// The observer's own body
    Earth,
}

impl Body {
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Earth => "earth",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sun" => Ok(Body::Sun),
            "earth" => Ok(Body::Earth),
            other => Err(GeometryError::data_unavailable(format!(
                "No ephemeris body named '{}'",
                other
            ))),
        }
    }
}

/// Read-only source of apparent body positions.
pub trait Ephemeris: Send + Sync + fmt::Debug {
    /// Bodies this source carries.
    fn bodies(&self) -> &[Body];

    /// Apparent (refraction-corrected) altitude of `body` above the horizon of `observer`.
    ///
    /// # Errors
    /// `GeometryError::DataUnavailable` when the source has no data for the body or instant.
    fn apparent_altitude(
        &self,
        body: Body,
        observer: &GeographicLocation,
        instant: DateTime<Utc>,
    ) -> GeometryResult<qtty::Degrees>;

    /// Look up a body by name, failing if this source does not carry it.
    fn body(&self, name: &str) -> GeometryResult<Body> {
        let body: Body = name.parse()?;
        if self.bodies().contains(&body) {
            Ok(body)
        } else {
            Err(GeometryError::data_unavailable(format!(
                "Ephemeris does not carry '{}'",
                body
            )))
        }
    }
}

/// Global ephemeris instance initialized once per process.
static EPHEMERIS: OnceLock<Arc<dyn Ephemeris>> = OnceLock::new();

/// Initialize the global ephemeris with the SPA model and the given atmosphere.
///
/// Does nothing if an ephemeris is already installed.
///
/// # Errors
/// `GeometryError::DataUnavailable` when the atmosphere settings are unusable.
pub fn init_ephemeris(atmosphere: AtmosphereModel) -> GeometryResult<()> {
    if EPHEMERIS.get().is_some() {
        return Ok(());
    }

    let ephemeris = SpaEphemeris::new(atmosphere)?;
    log::debug!("Initialising SPA ephemeris with {:?}", atmosphere);
    let _ = EPHEMERIS.set(Arc::new(ephemeris));
    Ok(())
}

/// Install a specific ephemeris as the global one.
///
/// Returns `false` if one was already installed; the existing instance is kept.
pub fn install_ephemeris(ephemeris: Arc<dyn Ephemeris>) -> bool {
    EPHEMERIS.set(ephemeris).is_ok()
}

/// Get a reference to the global ephemeris, initialising it with defaults if needed.
pub fn get_ephemeris() -> GeometryResult<&'static Arc<dyn Ephemeris>> {
    if EPHEMERIS.get().is_none() {
        init_ephemeris(AtmosphereModel::default())?;
    }

    EPHEMERIS
        .get()
        .ok_or_else(|| GeometryError::data_unavailable("Ephemeris not initialized"))
}
