//! Control limits shared by the mean and range charts.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use serde::{Deserialize, Serialize};

/// Control limits for a chart.
///
/// Represents the upper control limit (UCL), center line (CL), and lower
/// control limit (LCL) computed from the process data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlLimits {
    /// Upper control limit.
    pub ucl: f64,
    /// Center line.
    pub cl: f64,
    /// Lower control limit.
    pub lcl: f64,
}

impl ControlLimits {
    /// `true` unless `value` lies strictly above the UCL or strictly below
    /// the LCL.
    ///
    /// A point exactly on a limit is in control, and a NaN limit never
    /// flags a point.
    pub fn contains(&self, value: f64) -> bool {
        !(value > self.ucl || value < self.lcl)
    }
}
