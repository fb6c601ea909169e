//! Service layer for the filter diagnostics.
//!
//! Each service is a pure computation over its inputs plus, for the solar
//! geometry, the read-only process-wide ephemeris. The HTTP layer and library
//! callers go through these functions.

pub mod color_diagnostics;
pub mod decode;
pub mod filter_image;
pub mod report;
pub mod solar_geometry;

pub use color_diagnostics::{diagnose, diagnose_with_threshold, R_CORR_ANOMALY_THRESHOLD};
pub use decode::decode_image;
pub use filter_image::{analyze, sampling_geometry};
pub use report::build_report;
pub use solar_geometry::{estimate, estimate_with, predicted_delta_m, secant_z};
