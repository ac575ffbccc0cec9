//! Descriptive statistics.
//!
//! Moments are computed in their population (uncorrected) form:
//!
//! - variance = Σ(x - x̄)² / N
//! - skewness = mean of z³
//! - kurtosis = mean of z⁴ - 3 (excess)
//!
//! where z = (x - x̄) / σ with σ the population standard deviation.
//!
//! # Examples
//!
//! ```
//! use u_spc::descriptive::describe;
//!
//! let s = describe(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
//! assert!((s.mean - 3.5).abs() < 1e-12);
//! assert!((s.variance - 35.0 / 12.0).abs() < 1e-12);
//! assert_eq!(s.sample_size, 6);
//! ```

use serde::{Deserialize, Serialize};
use u_numflow::stats;

/// Summary statistics of one sample.
///
/// An empty sample yields [`DescriptiveStats::default`], every field zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveStats {
    /// Arithmetic mean.
    pub mean: f64,
    /// Middle value of the sorted sample; average of the two middle values
    /// for even sizes.
    pub median: f64,
    /// Population variance (divide by N).
    pub variance: f64,
    /// Square root of the population variance.
    pub standard_deviation: f64,
    pub minimum: f64,
    pub maximum: f64,
    /// `maximum - minimum`.
    pub range: f64,
    /// Mean of cubed z-scores. Zero when the standard deviation is zero or
    /// overflows to infinity.
    pub skewness: f64,
    /// Mean of fourth-power z-scores minus 3. Zero when the standard
    /// deviation is zero or overflows to infinity.
    pub kurtosis: f64,
    pub sample_size: usize,
}

/// Computes [`DescriptiveStats`] for a sample.
pub fn describe(data: &[f64]) -> DescriptiveStats {
    if data.is_empty() {
        return DescriptiveStats::default();
    }

    let mean = arithmetic_mean(data);
    let variance = population_variance(data, mean);
    let standard_deviation = variance.sqrt();

    let mut minimum = data[0];
    let mut maximum = data[0];
    for &x in &data[1..] {
        if x < minimum {
            minimum = x;
        }
        if x > maximum {
            maximum = x;
        }
    }

    DescriptiveStats {
        mean,
        median: median(data),
        variance,
        standard_deviation,
        minimum,
        maximum,
        range: maximum - minimum,
        skewness: standardized_moment(data, mean, standard_deviation, 3),
        kurtosis: standardized_moment(data, mean, standard_deviation, 4) - excess_offset(standard_deviation),
        sample_size: data.len(),
    }
}

/// Computes [`DescriptiveStats`] for every non-empty group, in group order.
///
/// Empty groups are skipped, so the result may be shorter than `groups`.
pub fn group_stats(groups: &[Vec<f64>]) -> Vec<DescriptiveStats> {
    groups
        .iter()
        .filter(|g| !g.is_empty())
        .map(|g| describe(g))
        .collect()
}

/// Average of the per-group statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub mean: f64,
    pub standard_deviation: f64,
    pub range: f64,
    pub minimum: f64,
    pub maximum: f64,
}

impl GroupSummary {
    /// Averages each field over `stats`. All zero when `stats` is empty.
    pub fn from_group_stats(stats: &[DescriptiveStats]) -> Self {
        if stats.is_empty() {
            return Self::default();
        }
        let n = stats.len() as f64;
        let avg = |f: fn(&DescriptiveStats) -> f64| stats.iter().map(f).sum::<f64>() / n;
        Self {
            mean: avg(|s| s.mean),
            standard_deviation: avg(|s| s.standard_deviation),
            range: avg(|s| s.range),
            minimum: avg(|s| s.minimum),
            maximum: avg(|s| s.maximum),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared moment helpers
// ---------------------------------------------------------------------------

/// Arithmetic mean, 0.0 for an empty sample.
pub(crate) fn arithmetic_mean(data: &[f64]) -> f64 {
    stats::mean(data).unwrap_or(0.0)
}

/// Σ(x - mean)² / N, 0.0 for an empty sample.
pub(crate) fn population_variance(data: &[f64], mean: f64) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / data.len() as f64
}

/// Population standard deviation of a sample.
pub(crate) fn population_std_dev(data: &[f64]) -> f64 {
    population_variance(data, arithmetic_mean(data)).sqrt()
}

fn median(data: &[f64]) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

// A zero or overflowed spread has no usable z-scores.
fn standardized_moment(data: &[f64], mean: f64, std_dev: f64, order: i32) -> f64 {
    if std_dev == 0.0 || !std_dev.is_finite() {
        return 0.0;
    }
    data.iter()
        .map(|&x| ((x - mean) / std_dev).powi(order))
        .sum::<f64>()
        / data.len() as f64
}

// Kurtosis of a constant or overflowed sample is reported as 0, not -3.
fn excess_offset(std_dev: f64) -> f64 {
    if std_dev == 0.0 || !std_dev.is_finite() {
        0.0
    } else {
        3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_group_example() {
        let s = describe(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!((s.mean - 3.5).abs() < 1e-12);
        assert!((s.median - 3.5).abs() < 1e-12);
        assert!((s.variance - 2.9167).abs() < 1e-4, "variance = {}", s.variance);
        assert!(
            (s.standard_deviation - 1.7078).abs() < 1e-4,
            "sd = {}",
            s.standard_deviation
        );
        assert_eq!(s.minimum, 1.0);
        assert_eq!(s.maximum, 6.0);
        assert_eq!(s.range, 5.0);
        assert_eq!(s.sample_size, 6);
    }

    #[test]
    fn symmetric_sample_has_zero_skewness() {
        let s = describe(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(s.skewness.abs() < 1e-12, "skewness = {}", s.skewness);
    }

    #[test]
    fn excess_kurtosis_is_uncorrected() {
        // m4 / m2² - 3 = (88.375 / 6) / (17.5 / 6)² - 3
        let s = describe(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let expected = (88.375 / 6.0) / (17.5_f64 / 6.0).powi(2) - 3.0;
        assert!(
            (s.kurtosis - expected).abs() < 1e-10,
            "expected {expected}, got {}",
            s.kurtosis
        );
    }

    #[test]
    fn right_tail_gives_positive_skewness() {
        let s = describe(&[1.0, 1.0, 1.0, 1.0, 10.0]);
        assert!(s.skewness > 0.0);
    }

    #[test]
    fn odd_length_median() {
        let s = describe(&[9.0, 1.0, 5.0]);
        assert_eq!(s.median, 5.0);
    }

    #[test]
    fn empty_sample_is_default() {
        assert_eq!(describe(&[]), DescriptiveStats::default());
    }

    #[test]
    fn constant_sample_has_zero_shape_moments() {
        let s = describe(&[4.0; 8]);
        assert_eq!(s.variance, 0.0);
        assert_eq!(s.skewness, 0.0);
        assert_eq!(s.kurtosis, 0.0);
        assert_eq!(s.range, 0.0);
    }

    #[test]
    fn overflowed_variance_gives_zero_shape_moments() {
        let s = describe(&[1e308, -1e308, 1e308]);
        assert!(s.variance.is_infinite());
        assert_eq!(s.skewness, 0.0);
        assert_eq!(s.kurtosis, 0.0);
    }

    #[test]
    fn describe_is_idempotent() {
        let data = [3.2, 1.7, 9.4, 4.4, 5.0];
        let a = describe(&data);
        let b = describe(&data);
        assert_eq!(a.mean.to_bits(), b.mean.to_bits());
        assert_eq!(a.kurtosis.to_bits(), b.kurtosis.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn group_stats_skip_empty_groups() {
        let groups = vec![vec![], vec![1.0, 2.0, 3.0]];
        let stats = group_stats(&groups);
        assert_eq!(stats.len(), 1);
        assert!((stats[0].mean - 2.0).abs() < 1e-12);
    }

    #[test]
    fn group_summary_averages_fields() {
        let stats = group_stats(&[vec![1.0, 3.0], vec![5.0, 9.0]]);
        let summary = GroupSummary::from_group_stats(&stats);
        assert!((summary.mean - 4.5).abs() < 1e-12);
        assert!((summary.range - 3.0).abs() < 1e-12);
        assert!((summary.minimum - 3.0).abs() < 1e-12);
        assert!((summary.maximum - 6.0).abs() < 1e-12);
        assert!((summary.standard_deviation - 1.5).abs() < 1e-12);
    }

    #[test]
    fn group_summary_of_nothing_is_zero() {
        assert_eq!(GroupSummary::from_group_stats(&[]), GroupSummary::default());
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let json = serde_json::to_value(describe(&[1.0, 2.0])).unwrap();
        assert!(json.get("standardDeviation").is_some());
        assert_eq!(json["sampleSize"], 2);
    }
}
