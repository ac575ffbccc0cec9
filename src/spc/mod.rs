//! Statistical Process Control (SPC) charts.
//!
//! # Variables Charts
//!
//! - [`xbar_r_chart`] — X-bar and Range chart for subgroup data, with the
//!   factor table for n = 2..10 and an n = 8 fallback row
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

mod chart;
mod variables;

pub use chart::ControlLimits;
pub use variables::{
    control_chart_factors, subgroup_size, xbar_r_chart, ChartFactors, ControlChartResult,
    FALLBACK_SUBGROUP_SIZE,
};
