//! Defect rates in parts per million and sigma quality levels.
//!
//! # Convention
//!
//! Sigma-level conversions use the Motorola 1.5-sigma long-term shift:
//!
//! | Sigma | PPM (defects per million) |
//! |-------|--------------------------|
//! | 6.0   | 3.4                      |
//! | 5.0   | 233                      |
//! | 4.0   | 6,210                    |
//! | 3.0   | 66,807                   |
//! | 2.0   | 308,538                  |
//!
//! The expected PPM of a capability study applies no shift: it is the
//! normal tail area beyond each limit at the observed z-scores.
//!
//! # References
//!
//! - Harry & Schroeder (2000), *Six Sigma: The Breakthrough Management
//!   Strategy Revolutionizing the World's Top Corporations*.

use u_numflow::special::{inverse_normal_cdf, standard_normal_cdf};

const PER_MILLION: f64 = 1_000_000.0;

/// Normal-model PPM outside both limits.
///
/// ```text
/// PPM = 10⁶ · [(1 - Φ(z_lower)) + Φ(-z_upper)]
/// ```
///
/// # Examples
///
/// ```
/// use u_spc::capability::expected_ppm;
///
/// // ±3σ limits: ~2,700 PPM
/// let ppm = expected_ppm(3.0, 3.0);
/// assert!((ppm - 2_700.0).abs() < 5.0);
/// ```
pub fn expected_ppm(lower_z: f64, upper_z: f64) -> f64 {
    let lower = PER_MILLION * (1.0 - standard_normal_cdf(lower_z));
    let upper = PER_MILLION * standard_normal_cdf(-upper_z);
    lower + upper
}

/// Counted PPM of values strictly below `lsl` or strictly above `usl`.
///
/// Zero for an empty sample.
///
/// # Examples
///
/// ```
/// use u_spc::capability::observed_ppm;
///
/// assert_eq!(observed_ppm(&[1.0, 5.0, 9.0, 12.0], 2.0, 10.0), 500_000.0);
/// assert_eq!(observed_ppm(&[], 2.0, 10.0), 0.0);
/// ```
pub fn observed_ppm(data: &[f64], lsl: f64, usl: f64) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let out_of_spec = data.iter().filter(|&&x| x < lsl || x > usl).count();
    PER_MILLION * out_of_spec as f64 / data.len() as f64
}

/// Converts a sigma quality level to a PPM defect rate.
///
/// ```text
/// PPM = 1,000,000 * (1 - Phi(sigma - 1.5))
/// ```
///
/// # Examples
///
/// ```
/// use u_spc::capability::sigma_to_ppm;
///
/// let ppm = sigma_to_ppm(6.0);
/// assert!((ppm - 3.4).abs() < 1.0);
/// ```
pub fn sigma_to_ppm(sigma: f64) -> f64 {
    PER_MILLION * (1.0 - standard_normal_cdf(sigma - 1.5))
}

/// Converts a PPM defect rate to a sigma quality level.
///
/// Inverse of [`sigma_to_ppm`]. `None` unless `ppm` is in `(0, 1_000_000)`.
///
/// # Examples
///
/// ```
/// use u_spc::capability::ppm_to_sigma;
///
/// let sigma = ppm_to_sigma(66_807.0).unwrap();
/// assert!((sigma - 3.0).abs() < 0.1);
/// assert!(ppm_to_sigma(0.0).is_none());
/// ```
pub fn ppm_to_sigma(ppm: f64) -> Option<f64> {
    if ppm.is_nan() || ppm <= 0.0 || ppm >= PER_MILLION {
        return None;
    }
    let z = inverse_normal_cdf(1.0 - ppm / PER_MILLION);
    z.is_finite().then_some(z + 1.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_ppm_symmetric_limits() {
        // Φ(-3) ≈ 0.0013499
        let ppm = expected_ppm(3.0, 3.0);
        assert!((ppm - 2_699.8).abs() < 2.0, "got {ppm}");
    }

    #[test]
    fn expected_ppm_one_sided_dominance() {
        // Close lower limit, remote upper limit: almost all from the lower tail.
        let ppm = expected_ppm(1.0, 10.0);
        let lower_only = PER_MILLION * (1.0 - standard_normal_cdf(1.0));
        assert!((ppm - lower_only).abs() < 1e-3);
        assert!((ppm - 158_655.0).abs() < 50.0, "got {ppm}");
    }

    #[test]
    fn expected_ppm_negative_z_means_mean_outside_limits() {
        assert!(expected_ppm(-1.0, 5.0) > 500_000.0);
    }

    #[test]
    fn observed_ppm_boundaries_inclusive() {
        assert_eq!(observed_ppm(&[2.0, 10.0], 2.0, 10.0), 0.0);
        assert_eq!(observed_ppm(&[1.999, 10.001], 2.0, 10.0), 1_000_000.0);
    }

    #[test]
    fn sigma_to_ppm_known_values() {
        let cases: &[(f64, f64, f64)] = &[
            (6.0, 3.4, 1.0),
            (5.0, 233.0, 20.0),
            (4.0, 6_210.0, 200.0),
            (3.0, 66_807.0, 500.0),
            (2.0, 308_538.0, 3_000.0),
        ];
        for &(sigma, expected, tol) in cases {
            let ppm = sigma_to_ppm(sigma);
            assert!(
                (ppm - expected).abs() < tol,
                "{sigma}-sigma should be ~{expected} PPM, got {ppm}"
            );
        }
    }

    #[test]
    fn roundtrip_sigma_ppm_sigma() {
        for &sigma in &[2.0, 3.0, 4.0, 5.0, 6.0] {
            let recovered = ppm_to_sigma(sigma_to_ppm(sigma)).expect("roundtrip should succeed");
            assert!(
                (recovered - sigma).abs() < 0.1,
                "sigma={sigma}, recovered={recovered}"
            );
        }
    }

    #[test]
    fn ppm_to_sigma_rejects_out_of_range() {
        for ppm in [0.0, -1.0, 1_000_000.0, 1_500_000.0, f64::NAN] {
            assert!(ppm_to_sigma(ppm).is_none(), "ppm = {ppm}");
        }
    }
}
