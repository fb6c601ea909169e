use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_EXTINCTION_COEFFICIENT;

/// Initial values of the observation form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationDefaults {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp_utc: DateTime<Utc>,
    pub r_corr: f64,
    pub extinction_coefficient: f64,
    pub r_corr_threshold: f64,
}

/// Route function name constant
pub const GET_DEFAULTS: &str = "get_defaults";

impl ObservationDefaults {
    /// Form defaults with the given extinction coefficient and R_corr threshold.
    pub fn with_policy(extinction_coefficient: f64, r_corr_threshold: f64) -> Self {
        Self {
            extinction_coefficient,
            r_corr_threshold,
            ..Self::default()
        }
    }
}

impl Default for ObservationDefaults {
    fn default() -> Self {
        Self {
            latitude: 35.6351,
            longitude: 127.4263,
            timestamp_utc: Utc
                .with_ymd_and_hms(2025, 6, 18, 14, 0, 0)
                .single()
                .unwrap_or(DateTime::UNIX_EPOCH),
            r_corr: 1.0,
            extinction_coefficient: DEFAULT_EXTINCTION_COEFFICIENT,
            r_corr_threshold: crate::services::color_diagnostics::R_CORR_ANOMALY_THRESHOLD,
        }
    }
}
