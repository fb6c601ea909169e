use serde::{Deserialize, Serialize};

use crate::api::{ColorDiagnosis, SolarGeometryResult};
use crate::error::GeometryError;

/// Geometry part of a report: either the estimate or why there is none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GeometryOutcome {
    Computed {
        #[serde(flatten)]
        result: SolarGeometryResult,
        observation_mjd: f64,
    },
    Failed {
        code: String,
        message: String,
    },
}

impl From<&GeometryError> for GeometryOutcome {
    fn from(err: &GeometryError) -> Self {
        GeometryOutcome::Failed {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Combined observation report: atmospheric prediction plus color verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterReport {
    pub geometry: GeometryOutcome,
    pub color: ColorDiagnosis,
}

/// Route function name constant
pub const POST_REPORT: &str = "post_report";
