//! Process capability indices (Cp, Cpk, Pp, Ppk, Cpm) with within/overall
//! sigma summaries and PPM defect rates.
//!
//! Short-term and long-term indices share one sigma here: the population
//! standard deviation of the flattened sample. Pp and Ppk therefore equal
//! Cp and Cpk. The within-subgroup sigma is reported separately in
//! [`CapabilityIndices::within`] but does not feed the indices.
//!
//! Limits are not validated. `usl <= lsl` or a zero sigma produce negative,
//! infinite or NaN indices, which are returned as computed.
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 8.
//! - Chan, Cheng & Spiring (1988), "A New Measure of Process Capability: Cpm",
//!   *Journal of Quality Technology* 20(3), pp. 162--175.

use serde::{Deserialize, Serialize};

use super::sigma_level::{expected_ppm, observed_ppm, ppm_to_sigma};
use crate::descriptive::{arithmetic_mean, describe, population_std_dev};

/// A sigma estimate and the distances from the mean to each limit in
/// units of that sigma.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigmaSummary {
    pub sigma: f64,
    /// (mean - LSL) / sigma.
    pub lower_z: f64,
    /// (USL - mean) / sigma.
    pub upper_z: f64,
}

impl SigmaSummary {
    fn new(sigma: f64, mean: f64, lsl: f64, usl: f64) -> Self {
        Self {
            sigma,
            lower_z: (mean - lsl) / sigma,
            upper_z: (usl - mean) / sigma,
        }
    }
}

/// Defects per million, modelled and counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PpmSummary {
    /// Normal-model tail area outside the limits, times 10⁶.
    pub expected: f64,
    /// Share of values outside the limits, times 10⁶.
    pub observed: f64,
}

/// Computed capability indices.
///
/// # Index interpretation
///
/// | Index | Value | Interpretation |
/// |-------|-------|----------------|
/// | Cpk | >= 1.33 | Process is capable and centered |
/// | Cpk | 1.0 .. 1.33 | Marginally capable |
/// | Cpk | < 1.0 | Not capable |
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityIndices {
    pub lsl: f64,
    pub usl: f64,
    /// (USL - LSL) / (6σ).
    pub cp: f64,
    /// min(Cpu, Cpl).
    pub cpk: f64,
    /// (mean - LSL) / (3σ).
    pub cpl: f64,
    /// (USL - mean) / (3σ).
    pub cpu: f64,
    /// Equal to `cp`.
    pub pp: f64,
    /// Equal to `cpk`.
    pub ppk: f64,
    /// Centering offset |mean - T| / ((USL - LSL) / 2), T the midpoint.
    pub k: f64,
    /// (USL - LSL) / (6τ), τ = √(mean of (x - T)²).
    pub cpm: f64,
    pub within: SigmaSummary,
    pub overall: SigmaSummary,
    pub ppm: PpmSummary,
}

impl CapabilityIndices {
    /// Sigma quality level implied by the expected PPM (1.5-sigma shift
    /// convention). `None` if the expected PPM is outside (0, 10⁶).
    pub fn sigma_level(&self) -> Option<f64> {
        ppm_to_sigma(self.ppm.expected)
    }
}

/// Computes capability indices for a flattened sample and its subgroups.
///
/// `data` is the flattened sample; `groups` are the raw subgroups it was
/// built from and only feed [`CapabilityIndices::within`].
///
/// # Examples
///
/// ```
/// use u_spc::capability::capability_indices;
///
/// let groups = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
/// let data: Vec<f64> = groups.concat();
/// let c = capability_indices(&data, &groups, 0.0, 7.0);
/// assert!((c.cp - 0.683).abs() < 1e-3);
/// assert_eq!(c.ppm.observed, 0.0);
/// ```
pub fn capability_indices(data: &[f64], groups: &[Vec<f64>], lsl: f64, usl: f64) -> CapabilityIndices {
    let stats = describe(data);
    let mean = stats.mean;
    let sigma = stats.standard_deviation;
    let target = (usl + lsl) / 2.0;

    let cp = (usl - lsl) / (6.0 * sigma);
    let cpu = (usl - mean) / (3.0 * sigma);
    let cpl = (mean - lsl) / (3.0 * sigma);
    let cpk = cpu.min(cpl);

    let k = (mean - target).abs() / ((usl - lsl) / 2.0);

    let tau = taguchi_tau(data, target);
    let cpm = (usl - lsl) / (6.0 * tau);

    let within_sigma = within_sigma(groups).unwrap_or(sigma);
    let overall = SigmaSummary::new(sigma, mean, lsl, usl);

    CapabilityIndices {
        lsl,
        usl,
        cp,
        cpk,
        cpl,
        cpu,
        pp: cp,
        ppk: cpk,
        k,
        cpm,
        within: SigmaSummary::new(within_sigma, mean, lsl, usl),
        overall,
        ppm: PpmSummary {
            expected: expected_ppm(overall.lower_z, overall.upper_z),
            observed: observed_ppm(data, lsl, usl),
        },
    }
}

/// Average population standard deviation of the groups with more than one
/// value, `None` if there are none.
pub fn within_sigma(groups: &[Vec<f64>]) -> Option<f64> {
    let sigmas: Vec<f64> = groups
        .iter()
        .filter(|g| g.len() > 1)
        .map(|g| population_std_dev(g))
        .collect();
    if sigmas.is_empty() {
        None
    } else {
        Some(arithmetic_mean(&sigmas))
    }
}

// Root mean squared deviation from the target rather than the mean, so it
// grows with both spread and off-target bias. NaN for an empty sample.
fn taguchi_tau(data: &[f64], target: f64) -> f64 {
    let sum_sq: f64 = data.iter().map(|&x| (x - target) * (x - target)).sum();
    (sum_sq / data.len() as f64).sqrt()
}
