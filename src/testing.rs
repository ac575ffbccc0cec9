//! Hypothesis testing on the flattened sample.
//!
//! Two deliberately coarse tests, kept in their simplified form because
//! downstream classification text depends on their exact thresholds:
//!
//! - [`normality_test`] — a bucketed Shapiro-Wilk approximation with
//!   linear weights and a four-level p-value table.
//! - [`mean_test`] — a one-sample location test that uses the standard
//!   normal distribution in place of Student's t (large-sample form).
//!
//! # Examples
//!
//! ```
//! use u_spc::testing::{mean_test, normality_test};
//!
//! let data = [9.8, 10.1, 10.0, 9.9, 10.2, 10.0, 9.7, 10.3];
//! let n = normality_test(&data);
//! assert_eq!(n.test_method, "Shapiro-Wilk");
//!
//! let m = mean_test(&data, 10.0, 0.05);
//! assert!(!m.test_result); // cannot reject H₀: μ = 10
//! ```

use serde::{Deserialize, Serialize};
use u_numflow::special;

use crate::descriptive::{arithmetic_mean, population_variance};

/// Significance level separating "normal" from "not normal".
const NORMALITY_ALPHA: f64 = 0.05;

/// Smallest sample the bucketed normality statistic is computed for.
pub const NORMALITY_MIN_SAMPLES: usize = 3;

/// Largest sample the bucketed normality statistic is computed for.
pub const NORMALITY_MAX_SAMPLES: usize = 50;

/// Method name reported by [`normality_test`].
pub const SHAPIRO_WILK: &str = "Shapiro-Wilk";

// ---------------------------------------------------------------------------
// Normality
// ---------------------------------------------------------------------------

/// Outcome of the normality test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalityResult {
    /// `p_value >= 0.05`.
    pub is_normal: bool,
    /// The approximate W statistic, 0.0 when the sample size is outside
    /// 3..=50.
    pub statistic: f64,
    /// Bucketed p-value: one of 0.01, 0.05, 0.1, 1.0, or 0.5 when the
    /// sample size is outside 3..=50.
    pub p_value: f64,
    pub test_method: String,
    pub conclusion: String,
}

/// W statistic and bucketed p-value of the approximate Shapiro-Wilk test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilkApprox {
    pub w: f64,
    pub p_value: f64,
}

/// Approximate Shapiro-Wilk statistic.
///
/// # Algorithm
///
/// For a sorted sample x₍₀₎..x₍ₙ₋₁₎ with mean x̄:
///
/// ```text
/// aᵢ = 0.7 · (n - 2i - 1) / (n - 1)              for i in 0..n/2
/// W  = (Σ aᵢ · (x₍ₙ₋₁₋ᵢ₎ - x₍ᵢ₎))² / Σ (x - x̄)²
/// ```
///
/// W maps to a p-value by fixed buckets: W < 0.90 → 0.01,
/// W < 0.95 → 0.05, W < 0.98 → 0.1, otherwise 1.0.
///
/// Samples with fewer than 3 or more than 50 values are not tested and
/// report `W = 0.0, p = 0.5`. A constant sample gives `0 / 0 = NaN`, which
/// falls through every bucket to `p = 1.0`.
pub fn approximate_shapiro_wilk(data: &[f64]) -> ShapiroWilkApprox {
    let n = data.len();
    if !(NORMALITY_MIN_SAMPLES..=NORMALITY_MAX_SAMPLES).contains(&n) {
        return ShapiroWilkApprox {
            w: 0.0,
            p_value: 0.5,
        };
    }

    let mut x = data.to_vec();
    x.sort_by(f64::total_cmp);
    let mean = arithmetic_mean(&x);

    let weighted_spread: f64 = (0..n / 2)
        .map(|i| {
            let a = 0.7 * (n - 2 * i - 1) as f64 / (n - 1) as f64;
            a * (x[n - 1 - i] - x[i])
        })
        .sum();
    let numerator = weighted_spread * weighted_spread;
    let denominator: f64 = x.iter().map(|&v| (v - mean) * (v - mean)).sum();

    let w = numerator / denominator;
    ShapiroWilkApprox {
        w,
        p_value: w_bucket_p_value(w),
    }
}

fn w_bucket_p_value(w: f64) -> f64 {
    if w < 0.90 {
        0.01
    } else if w < 0.95 {
        0.05
    } else if w < 0.98 {
        0.1
    } else {
        1.0
    }
}

/// Runs [`approximate_shapiro_wilk`] and classifies the result.
pub fn normality_test(data: &[f64]) -> NormalityResult {
    let ShapiroWilkApprox { w, p_value } = approximate_shapiro_wilk(data);
    let is_normal = p_value >= NORMALITY_ALPHA;
    let conclusion = if is_normal {
        "data is consistent with a normal distribution (p > 0.05)"
    } else {
        "data departs from a normal distribution (p <= 0.05)"
    };

    NormalityResult {
        is_normal,
        statistic: w,
        p_value,
        test_method: SHAPIRO_WILK.to_string(),
        conclusion: conclusion.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Mean
// ---------------------------------------------------------------------------

/// Outcome of the one-sample mean test.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeanTestResult {
    pub sample_mean: f64,
    pub expected_mean: f64,
    /// (x̄ - μ₀) / (σ / √N) with σ the population standard deviation.
    pub t_statistic: f64,
    /// Two-sided p-value from the standard normal distribution.
    pub p_value: f64,
    pub alpha: f64,
    /// Whether H₀: μ = μ₀ is rejected (`p_value <= alpha`).
    pub test_result: bool,
    pub conclusion: String,
}

/// Conclusion reported when there is nothing to test.
pub const NO_DATA_CONCLUSION: &str = "no data";

/// One-sample test of H₀: μ = `expected_mean`.
///
/// # Algorithm
///
/// ```text
/// t = (x̄ - μ₀) / (σ / √N)
/// p = 2 · (1 - Φ(|t|))
/// ```
///
/// Φ is the standard normal CDF, so the p-value is only accurate for large
/// samples. `alpha` is used as given; H₀ is rejected when `p <= alpha`.
///
/// An empty sample is not rejected: `test_result = false`, conclusion
/// [`NO_DATA_CONCLUSION`], and only the inputs echoed back. A
/// zero-variance sample propagates the infinite or NaN statistic.
pub fn mean_test(data: &[f64], expected_mean: f64, alpha: f64) -> MeanTestResult {
    if data.is_empty() {
        return MeanTestResult {
            expected_mean,
            alpha,
            test_result: false,
            conclusion: NO_DATA_CONCLUSION.to_string(),
            ..MeanTestResult::default()
        };
    }

    let sample_mean = arithmetic_mean(data);
    let std_dev = population_variance(data, sample_mean).sqrt();
    let t_statistic = (sample_mean - expected_mean) / (std_dev / (data.len() as f64).sqrt());
    let p_value = 2.0 * (1.0 - special::standard_normal_cdf(t_statistic.abs()));
    let test_result = p_value <= alpha;

    let conclusion = if test_result {
        "reject H0: sample mean differs significantly from the expected mean"
    } else {
        "fail to reject H0: no significant difference from the expected mean"
    };

    MeanTestResult {
        sample_mean,
        expected_mean,
        t_statistic,
        p_value,
        alpha,
        test_result,
        conclusion: conclusion.to_string(),
    }
}
