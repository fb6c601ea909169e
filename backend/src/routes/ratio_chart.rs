use serde::{Deserialize, Serialize};

use crate::api::ImageAnalysisResult;

/// Fixed y-axis range of the ratio chart.
pub const RATIO_CHART_Y_RANGE: (f64, f64) = (0.0, 2.0);

/// One bar of the channel ratio chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioBar {
    pub label: String,
    pub value: f64,
    pub color: String,
}

/// Bar chart of the three center-window channel ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioChartData {
    pub title: String,
    pub y_label: String,
    pub y_min: f64,
    pub y_max: f64,
    pub bars: Vec<RatioBar>,
}

/// Route function name constant
pub const GET_RATIO_CHART: &str = "get_ratio_chart";

/// Build the chart description; bars are R/G (red), G/B (green), R/B (blue).
pub fn build_ratio_chart(result: &ImageAnalysisResult) -> RatioChartData {
    let bar = |label: &str, value: f64, color: &str| RatioBar {
        label: label.to_string(),
        value,
        color: color.to_string(),
    };

    RatioChartData {
        title: "RGB channel ratios".to_string(),
        y_label: "Ratio".to_string(),
        y_min: RATIO_CHART_Y_RANGE.0,
        y_max: RATIO_CHART_Y_RANGE.1,
        bars: vec![
            bar("R/G", result.rg_ratio, "red"),
            bar("G/B", result.gb_ratio, "green"),
            bar("R/B", result.rb_ratio, "blue"),
        ],
    }
}
