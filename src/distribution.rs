//! Histogram binning.
//!
//! # Examples
//!
//! ```
//! use u_spc::distribution::histogram_centers;
//!
//! let centers = histogram_centers(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 5);
//! assert_eq!(centers, vec![1.5, 2.5, 3.5, 4.5, 5.5]);
//! ```

/// Bin count used when none is requested.
pub const DEFAULT_BINS: usize = 10;

/// Centers of `bins` equal-width bins spanning `[min, max]` of the data.
///
/// Only the centers are returned, not counts. Empty data or `bins == 0`
/// gives an empty vector; a zero range (all values equal) gives `[min]`.
pub fn histogram_centers(data: &[f64], bins: usize) -> Vec<f64> {
    if data.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min_val = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max_val = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max_val - min_val;

    if range <= 0.0 {
        return vec![min_val];
    }

    let bin_width = range / bins as f64;
    (0..bins)
        .map(|i| min_val + (i as f64 + 0.5) * bin_width)
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn centers_inside_range_and_increasing(
            data in proptest::collection::vec(-1e3_f64..1e3, 2..=50),
            bins in 1_usize..=30,
        ) {
            let centers = histogram_centers(&data, bins);
            let lo = data.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if hi > lo {
                prop_assert_eq!(centers.len(), bins);
                for w in centers.windows(2) {
                    prop_assert!(w[0] < w[1]);
                }
                prop_assert!(centers[0] > lo && centers[bins - 1] < hi);
            } else {
                prop_assert_eq!(centers, vec![lo]);
            }
        }
    }
}
