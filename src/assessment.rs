//! Qualitative process assessment.
//!
//! Combines the control chart verdict and Cpk into three pieces of text:
//! a stability status, a capability level and one recommendation. Stability
//! takes precedence: an unstable process is told to remove special causes
//! before anything is said about capability.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::capability::CapabilityIndices;
use crate::spc::ControlChartResult;

/// Cpk at or above which capability is excellent.
pub const CPK_EXCELLENT: f64 = 1.33;

/// Cpk at or above which capability is good.
pub const CPK_GOOD: f64 = 1.0;

/// Whether the control chart shows statistical control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stability {
    Controlled,
    NotControlled,
}

impl Stability {
    pub fn from_chart(chart: &ControlChartResult) -> Self {
        if chart.is_controlled {
            Stability::Controlled
        } else {
            Stability::NotControlled
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stability::Controlled => {
                write!(f, "process is stable and in statistical control")
            }
            Stability::NotControlled => {
                write!(f, "process is unstable and not in statistical control")
            }
        }
    }
}

/// Three-tier capability classification on Cpk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityLevel {
    /// Cpk >= 1.33
    Excellent,
    /// 1.0 <= Cpk < 1.33
    Good,
    /// Cpk < 1.0, or NaN
    Insufficient,
}

impl CapabilityLevel {
    pub fn from_cpk(cpk: f64) -> Self {
        if cpk >= CPK_EXCELLENT {
            CapabilityLevel::Excellent
        } else if cpk >= CPK_GOOD {
            CapabilityLevel::Good
        } else {
            CapabilityLevel::Insufficient
        }
    }
}

impl fmt::Display for CapabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityLevel::Excellent => write!(f, "excellent process capability (Cpk >= 1.33)"),
            CapabilityLevel::Good => write!(f, "good process capability (1.0 <= Cpk < 1.33)"),
            CapabilityLevel::Insufficient => {
                write!(f, "insufficient process capability (Cpk < 1.0)")
            }
        }
    }
}

/// The single next step suggested for the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    EliminateSpecialCauses,
    ImproveCapability,
    MaintainAndMonitor,
}

impl Recommendation {
    /// Picks the recommendation; stability is checked first.
    ///
    /// A NaN Cpk on a controlled process is not `< 1.0` and yields
    /// [`Recommendation::MaintainAndMonitor`].
    pub fn select(stability: Stability, cpk: f64) -> Self {
        if stability == Stability::NotControlled {
            Recommendation::EliminateSpecialCauses
        } else if cpk < CPK_GOOD {
            Recommendation::ImproveCapability
        } else {
            Recommendation::MaintainAndMonitor
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Recommendation::EliminateSpecialCauses => {
                "identify and eliminate special-cause variation to bring the process into statistical control"
            }
            Recommendation::ImproveCapability => {
                "improve the process to raise its capability"
            }
            Recommendation::MaintainAndMonitor => {
                "maintain the current process and monitor it regularly"
            }
        };
        f.write_str(text)
    }
}

/// Assessment text for one process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessAssessment {
    pub stability_status: String,
    pub capability_level: String,
    pub recommendations: String,
}

/// Assesses a process from its capability indices and control chart.
///
/// # Examples
///
/// ```
/// use u_spc::assessment::{assess_process, CapabilityLevel};
/// use u_spc::dataset::Dataset;
///
/// let data = Dataset::from_groups(vec![
///     vec![9.9, 10.0, 10.1],
///     vec![10.0, 10.1, 9.9],
///     vec![10.1, 9.9, 10.0],
/// ])
/// .unwrap();
/// let a = assess_process(&data.capability_indices(9.0, 11.0), &data.control_chart());
/// assert_eq!(a.capability_level, CapabilityLevel::Excellent.to_string());
/// ```
pub fn assess_process(indices: &CapabilityIndices, chart: &ControlChartResult) -> ProcessAssessment {
    let stability = Stability::from_chart(chart);
    ProcessAssessment {
        stability_status: stability.to_string(),
        capability_level: CapabilityLevel::from_cpk(indices.cpk).to_string(),
        recommendations: Recommendation::select(stability, indices.cpk).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(is_controlled: bool) -> ControlChartResult {
        ControlChartResult {
            is_controlled,
            ..ControlChartResult::default()
        }
    }

    fn indices(cpk: f64) -> CapabilityIndices {
        CapabilityIndices {
            cpk,
            ..CapabilityIndices::default()
        }
    }

    #[test]
    fn capability_tiers() {
        assert_eq!(CapabilityLevel::from_cpk(2.0), CapabilityLevel::Excellent);
        assert_eq!(CapabilityLevel::from_cpk(1.33), CapabilityLevel::Excellent);
        assert_eq!(CapabilityLevel::from_cpk(1.3299), CapabilityLevel::Good);
        assert_eq!(CapabilityLevel::from_cpk(1.0), CapabilityLevel::Good);
        assert_eq!(CapabilityLevel::from_cpk(0.9999), CapabilityLevel::Insufficient);
        assert_eq!(CapabilityLevel::from_cpk(-1.0), CapabilityLevel::Insufficient);
        assert_eq!(CapabilityLevel::from_cpk(f64::NAN), CapabilityLevel::Insufficient);
    }

    #[test]
    fn instability_takes_precedence() {
        let a = assess_process(&indices(2.0), &chart(false));
        assert_eq!(a.stability_status, Stability::NotControlled.to_string());
        assert_eq!(a.capability_level, CapabilityLevel::Excellent.to_string());
        assert_eq!(
            a.recommendations,
            Recommendation::EliminateSpecialCauses.to_string()
        );
    }

    #[test]
    fn stable_but_incapable_needs_improvement() {
        let a = assess_process(&indices(0.8), &chart(true));
        assert_eq!(a.stability_status, Stability::Controlled.to_string());
        assert_eq!(a.recommendations, Recommendation::ImproveCapability.to_string());
    }

    #[test]
    fn stable_and_capable_is_maintained() {
        for cpk in [1.0, 1.2, 1.5] {
            let a = assess_process(&indices(cpk), &chart(true));
            assert_eq!(a.recommendations, Recommendation::MaintainAndMonitor.to_string());
        }
    }

    #[test]
    fn nan_cpk_on_stable_process() {
        assert_eq!(
            Recommendation::select(Stability::Controlled, f64::NAN),
            Recommendation::MaintainAndMonitor
        );
    }

    #[test]
    fn level_follows_real_sigma() {
        use crate::dataset::Dataset;

        let data = Dataset::from_groups(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        // Wide limits: Cpk = 96.5 / (3 * 1.7078) ≫ 1.33
        let wide = data.assess_process(-100.0, 100.0);
        assert_eq!(wide.capability_level, CapabilityLevel::Excellent.to_string());
        // Tight limits: Cpk = 3.5 / (3 * 1.7078) ≈ 0.683
        let tight = data.assess_process(0.0, 7.0);
        assert_eq!(tight.capability_level, CapabilityLevel::Insufficient.to_string());
    }
}
