//! R_corr color diagnostics.

use crate::api::ColorDiagnosis;

/// Default R_corr anomaly threshold. Overridable through `[diagnosis]` in the config
/// until a calibrated value exists.
pub const R_CORR_ANOMALY_THRESHOLD: f64 = 0.95;

const ANOMALOUS_VERDICT: &str =
    "R_corr is below the reference value: red channel attenuation or filter degradation is possible";
const NORMAL_VERDICT: &str = "R_corr is within the normal range";

/// Diagnose `r_corr` against the default threshold.
pub fn diagnose(r_corr: f64) -> ColorDiagnosis {
    diagnose_with_threshold(r_corr, R_CORR_ANOMALY_THRESHOLD)
}

/// Diagnose `r_corr` against `threshold`; anomalous only when strictly below it.
///
/// NaN compares false and is therefore reported as not anomalous.
pub fn diagnose_with_threshold(r_corr: f64, threshold: f64) -> ColorDiagnosis {
    let is_anomalous = r_corr < threshold;
    ColorDiagnosis {
        r_corr,
        is_anomalous,
        threshold,
        verdict: if is_anomalous {
            ANOMALOUS_VERDICT
        } else {
            NORMAL_VERDICT
        }
        .to_string(),
    }
}
