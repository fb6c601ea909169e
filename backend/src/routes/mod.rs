pub mod defaults;
pub mod ratio_chart;
pub mod report;
