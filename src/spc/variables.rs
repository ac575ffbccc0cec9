//! X-bar and Range control chart.
//!
//! Monitors the subgroup means (X-bar chart) and subgroup ranges (R chart)
//! of grouped data in time order.
//!
//! # Algorithm
//!
//! 1. For each non-empty subgroup, take its mean (X-bar) and range (R).
//! 2. Compute the grand mean (X-double-bar) and average range (R-bar).
//! 3. X-bar chart limits: CL = X-double-bar, UCL/LCL = CL +/- A2 * R-bar.
//! 4. R chart limits: CL = R-bar, UCL = D4 * R-bar, LCL = D3 * R-bar.
//! 5. The process is in control when every mean and every range lies
//!    within its limits.
//!
//! The subgroup size n that selects the factors is the size of the first
//! non-empty subgroup; all subgroups are assumed to share it.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 6: Control Charts for Variables.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use serde::{Deserialize, Serialize};

use super::chart::ControlLimits;
use crate::descriptive::arithmetic_mean;

// ---------------------------------------------------------------------------
// Control chart factor tables, indexed by subgroup size n=2..10
// Index 0 corresponds to n=2.
// ---------------------------------------------------------------------------

/// A2 factors for X-bar chart UCL/LCL computation.
const A2: [f64; 9] = [1.880, 1.023, 0.729, 0.577, 0.483, 0.419, 0.373, 0.337, 0.308];

/// D3 factors for R chart lower control limit.
const D3: [f64; 9] = [0.0, 0.0, 0.0, 0.0, 0.0, 0.076, 0.136, 0.184, 0.223];

/// D4 factors for R chart upper control limit.
const D4: [f64; 9] = [3.267, 2.575, 2.282, 2.115, 2.004, 1.924, 1.864, 1.816, 1.777];

/// Subgroup size whose factors are used when n is outside 2..=10.
pub const FALLBACK_SUBGROUP_SIZE: usize = 8;

/// A2, D3 and D4 for one subgroup size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFactors {
    pub a2: f64,
    pub d3: f64,
    pub d4: f64,
}

/// Looks up the X-bar/R factors for subgroup size `n`.
///
/// Sizes outside 2..=10 use the n = 8 row (A2 = 0.373, D3 = 0.136,
/// D4 = 1.864). The row is copied, not extrapolated.
///
/// # Examples
///
/// ```
/// use u_spc::spc::control_chart_factors;
///
/// let f = control_chart_factors(3);
/// assert_eq!((f.a2, f.d3, f.d4), (1.023, 0.0, 2.575));
/// assert_eq!(control_chart_factors(11), control_chart_factors(8));
/// ```
pub fn control_chart_factors(n: usize) -> ChartFactors {
    let n = if (2..=10).contains(&n) {
        n
    } else {
        FALLBACK_SUBGROUP_SIZE
    };
    let idx = n - 2;
    ChartFactors {
        a2: A2[idx],
        d3: D3[idx],
        d4: D4[idx],
    }
}

/// Size of the first non-empty subgroup, `None` if every group is empty.
pub fn subgroup_size(groups: &[Vec<f64>]) -> Option<usize> {
    groups.iter().map(Vec::len).find(|&n| n > 0)
}

/// X-bar/R chart data and stability verdict.
///
/// Without any non-empty subgroup every field is zero or empty and
/// `is_controlled` is `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlChartResult {
    /// Subgroup means in group order.
    pub means: Vec<f64>,
    /// Subgroup ranges, parallel to `means`.
    pub ranges: Vec<f64>,
    pub cl_mean: f64,
    pub ucl_mean: f64,
    pub lcl_mean: f64,
    pub cl_range: f64,
    pub ucl_range: f64,
    pub lcl_range: f64,
    /// No mean or range outside its limits.
    pub is_controlled: bool,
}

impl ControlChartResult {
    /// Limits of the X-bar chart.
    pub fn mean_limits(&self) -> ControlLimits {
        ControlLimits {
            ucl: self.ucl_mean,
            cl: self.cl_mean,
            lcl: self.lcl_mean,
        }
    }

    /// Limits of the R chart.
    pub fn range_limits(&self) -> ControlLimits {
        ControlLimits {
            ucl: self.ucl_range,
            cl: self.cl_range,
            lcl: self.lcl_range,
        }
    }
}

/// Builds the X-bar/R chart from per-subgroup means and ranges.
///
/// `subgroup_size` selects the factors (see [`control_chart_factors`]).
/// `means` and `ranges` must be parallel; empty input yields
/// [`ControlChartResult::default`].
///
/// # Examples
///
/// ```
/// use u_spc::spc::xbar_r_chart;
///
/// let chart = xbar_r_chart(3, &[2.0, 5.0], &[2.0, 2.0]);
/// assert!((chart.cl_mean - 3.5).abs() < 1e-12);
/// assert!((chart.ucl_mean - (3.5 + 1.023 * 2.0)).abs() < 1e-12);
/// assert!(chart.is_controlled);
/// ```
pub fn xbar_r_chart(subgroup_size: usize, means: &[f64], ranges: &[f64]) -> ControlChartResult {
    if means.is_empty() {
        return ControlChartResult::default();
    }

    let grand_mean = arithmetic_mean(means);
    let r_bar = arithmetic_mean(ranges);
    let ChartFactors { a2, d3, d4 } = control_chart_factors(subgroup_size);

    let mean_limits = ControlLimits {
        ucl: grand_mean + a2 * r_bar,
        cl: grand_mean,
        lcl: grand_mean - a2 * r_bar,
    };
    let range_limits = ControlLimits {
        ucl: d4 * r_bar,
        cl: r_bar,
        lcl: d3 * r_bar,
    };

    let is_controlled = means
        .iter()
        .zip(ranges)
        .all(|(&m, &r)| mean_limits.contains(m) && range_limits.contains(r));

    ControlChartResult {
        means: means.to_vec(),
        ranges: ranges.to_vec(),
        cl_mean: mean_limits.cl,
        ucl_mean: mean_limits.ucl,
        lcl_mean: mean_limits.lcl,
        cl_range: range_limits.cl,
        ucl_range: range_limits.ucl,
        lcl_range: range_limits.lcl,
        is_controlled,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_limits_are_ordered(
            groups in proptest::collection::vec(
                proptest::collection::vec(-1e3_f64..1e3, 5),
                1..=25,
            )
        ) {
            let data = crate::dataset::Dataset::from_groups(groups).unwrap();
            let chart = data.control_chart();
            prop_assert!(chart.lcl_mean <= chart.cl_mean && chart.cl_mean <= chart.ucl_mean);
            prop_assert!(chart.lcl_range <= chart.cl_range && chart.cl_range <= chart.ucl_range);
            prop_assert_eq!(chart.means.len(), chart.ranges.len());
        }
    }
}
