//! Grouped measurement dataset and its derived aggregates.
//!
//! A [`Dataset`] owns the raw subgroups in time order together with the
//! values every analysis reads: the flattened sample and the per-group
//! means and ranges. All of them are rebuilt together whenever the data is
//! replaced, and replacement needs `&mut self`, so a reader holding `&Dataset`
//! can never observe a half-replaced state. Sessions that run concurrently
//! each own their own `Dataset`.
//!
//! # Examples
//!
//! ```
//! use u_spc::dataset::Dataset;
//!
//! let mut data = Dataset::new();
//! data.set_data(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
//! assert_eq!(data.flattened(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
//! assert_eq!(data.group_means(), &[2.0, 5.0]);
//! assert_eq!(data.group_ranges(), &[2.0, 2.0]);
//! ```

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, info};

use crate::assessment::{assess_process, ProcessAssessment};
use crate::capability::{capability_indices, CapabilityIndices};
use crate::descriptive::{self, arithmetic_mean, DescriptiveStats};
use crate::distribution::histogram_centers;
use crate::error::{Result, SpcError};
use crate::spc::{subgroup_size, xbar_r_chart, ControlChartResult};
use crate::testing::{mean_test, normality_test, MeanTestResult, NormalityResult};

/// Every group whose index is a multiple of this is scaled by
/// [`ANOMALY_FACTOR`] during generation.
pub const ANOMALY_PERIOD: usize = 5;

/// Multiplier applied to the samples of anomalous generated groups.
pub const ANOMALY_FACTOR: f64 = 1.2;

/// Mean and range of one non-empty group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupAggregate {
    pub mean: f64,
    /// `max - min` of the group.
    pub range: f64,
}

impl GroupAggregate {
    /// Aggregates a group, `None` if it is empty.
    pub fn of(group: &[f64]) -> Option<Self> {
        let first = *group.first()?;
        let (min, max) = group
            .iter()
            .fold((first, first), |(lo, hi), &x| (lo.min(x), hi.max(x)));
        Some(Self {
            mean: arithmetic_mean(group),
            range: max - min,
        })
    }
}

/// The grouped dataset of one analysis session.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    groups: Vec<Vec<f64>>,
    flattened: Vec<f64>,
    group_means: Vec<f64>,
    group_ranges: Vec<f64>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dataset from groups, rejecting non-finite values.
    pub fn from_groups(groups: Vec<Vec<f64>>) -> Result<Self> {
        validate_finite(&groups)?;

        let flattened: Vec<f64> = groups.iter().flatten().copied().collect();
        let (group_means, group_ranges) = groups
            .iter()
            .filter_map(|g| GroupAggregate::of(g))
            .map(|a| (a.mean, a.range))
            .unzip();

        Ok(Self {
            groups,
            flattened,
            group_means,
            group_ranges,
        })
    }

    /// Replaces the whole dataset and recomputes every aggregate.
    ///
    /// Empty groups are kept in the raw data but contribute nothing to the
    /// group means and ranges. On error the current data is left untouched.
    pub fn set_data(&mut self, groups: Vec<Vec<f64>>) -> Result<()> {
        let next = Self::from_groups(groups)?;
        debug!(
            groups = next.groups.len(),
            samples = next.flattened.len(),
            empty_groups = next.groups.len() - next.group_means.len(),
            "dataset replaced"
        );
        *self = next;
        Ok(())
    }

    /// Replaces the dataset with imported groups, dropping empty ones.
    ///
    /// Returns the number of groups kept.
    pub fn import(&mut self, groups: Vec<Vec<f64>>) -> Result<usize> {
        let kept: Vec<Vec<f64>> = groups.into_iter().filter(|g| !g.is_empty()).collect();
        let count = kept.len();
        self.set_data(kept)?;
        Ok(count)
    }

    /// Replaces the dataset with freshly generated normal samples.
    ///
    /// See [`generate_sample_data`].
    pub fn generate(
        &mut self,
        group_count: usize,
        samples_per_group: usize,
        mean: f64,
        std_dev: f64,
    ) -> Result<()> {
        let groups = generate_sample_data(group_count, samples_per_group, mean, std_dev)?;
        self.set_data(groups)
    }

    /// Raw groups in time order, including empty ones.
    pub fn groups(&self) -> &[Vec<f64>] {
        &self.groups
    }

    /// All values, group by group.
    pub fn flattened(&self) -> &[f64] {
        &self.flattened
    }

    /// Means of the non-empty groups, in group order.
    pub fn group_means(&self) -> &[f64] {
        &self.group_means
    }

    /// Ranges of the non-empty groups, parallel to [`Dataset::group_means`].
    pub fn group_ranges(&self) -> &[f64] {
        &self.group_ranges
    }

    /// `true` when no group has been loaded.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    // -----------------------------------------------------------------------
    // Analyses over the current snapshot
    // -----------------------------------------------------------------------

    /// Descriptive statistics of the flattened sample.
    pub fn overall_stats(&self) -> DescriptiveStats {
        descriptive::describe(&self.flattened)
    }

    /// Descriptive statistics of each non-empty group.
    pub fn group_stats(&self) -> Vec<DescriptiveStats> {
        descriptive::group_stats(&self.groups)
    }

    /// Bin centers of an equal-width histogram of the flattened sample.
    pub fn histogram(&self, bins: usize) -> Vec<f64> {
        histogram_centers(&self.flattened, bins)
    }

    /// Approximate Shapiro-Wilk normality test of the flattened sample.
    pub fn test_normality(&self) -> NormalityResult {
        normality_test(&self.flattened)
    }

    /// Tests the flattened sample's mean against `expected_mean`.
    pub fn test_mean(&self, expected_mean: f64, alpha: f64) -> MeanTestResult {
        mean_test(&self.flattened, expected_mean, alpha)
    }

    /// Capability indices against the specification limits.
    pub fn capability_indices(&self, lsl: f64, usl: f64) -> CapabilityIndices {
        capability_indices(&self.flattened, &self.groups, lsl, usl)
    }

    /// X-bar/R control chart of the subgroups.
    ///
    /// The subgroup size is taken from the first non-empty group.
    pub fn control_chart(&self) -> ControlChartResult {
        match subgroup_size(&self.groups) {
            Some(n) => xbar_r_chart(n, &self.group_means, &self.group_ranges),
            None => ControlChartResult::default(),
        }
    }

    /// Qualitative assessment combining capability and stability.
    pub fn assess_process(&self, lsl: f64, usl: f64) -> ProcessAssessment {
        assess_process(&self.capability_indices(lsl, usl), &self.control_chart())
    }
}

fn validate_finite(groups: &[Vec<f64>]) -> Result<()> {
    for (group, values) in groups.iter().enumerate() {
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(SpcError::NonFiniteValue {
                group,
                index,
                value,
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Synthetic data
// ---------------------------------------------------------------------------

/// Draws `group_count` groups of `samples_per_group` normal samples.
///
/// Uses the entropy-seeded thread generator, so results are not
/// reproducible. Every group whose index is a multiple of
/// [`ANOMALY_PERIOD`] has its samples multiplied by [`ANOMALY_FACTOR`].
///
/// # Errors
///
/// [`SpcError::InvalidDistribution`] if `mean` is not finite or `std_dev`
/// is negative or not finite.
pub fn generate_sample_data(
    group_count: usize,
    samples_per_group: usize,
    mean: f64,
    std_dev: f64,
) -> Result<Vec<Vec<f64>>> {
    generate_sample_data_with(
        &mut rand::thread_rng(),
        group_count,
        samples_per_group,
        mean,
        std_dev,
    )
}

/// [`generate_sample_data`] with a caller-supplied generator.
pub fn generate_sample_data_with<R: Rng + ?Sized>(
    rng: &mut R,
    group_count: usize,
    samples_per_group: usize,
    mean: f64,
    std_dev: f64,
) -> Result<Vec<Vec<f64>>> {
    if !mean.is_finite() || !std_dev.is_finite() || std_dev < 0.0 {
        return Err(SpcError::InvalidDistribution { mean, std_dev });
    }
    let normal =
        Normal::new(mean, std_dev).map_err(|_| SpcError::InvalidDistribution { mean, std_dev })?;

    info!(group_count, samples_per_group, mean, std_dev, "generating sample data");

    let groups = (0..group_count)
        .map(|i| {
            let factor = if i % ANOMALY_PERIOD == 0 {
                ANOMALY_FACTOR
            } else {
                1.0
            };
            (0..samples_per_group)
                .map(|_| normal.sample(rng) * factor)
                .collect()
        })
        .collect();

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn set_data_derives_aggregates() {
        let mut data = Dataset::new();
        data.set_data(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
            .unwrap();
        assert_eq!(data.flattened(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(data.group_means(), &[2.0, 5.0]);
        assert_eq!(data.group_ranges(), &[2.0, 2.0]);
        assert_eq!(data.groups().len(), 2);
    }

    #[test]
    fn empty_groups_kept_raw_but_not_aggregated() {
        let data = Dataset::from_groups(vec![vec![], vec![1.0, 3.0], vec![]]).unwrap();
        assert_eq!(data.groups().len(), 3);
        assert_eq!(data.group_means(), &[2.0]);
        assert_eq!(data.group_ranges(), &[2.0]);
        assert_eq!(data.flattened(), &[1.0, 3.0]);
    }

    #[test]
    fn set_data_replaces_previous_state() {
        let mut data = Dataset::new();
        data.set_data(vec![vec![1.0, 2.0]; 4]).unwrap();
        data.set_data(vec![vec![7.0]]).unwrap();
        assert_eq!(data.flattened(), &[7.0]);
        assert_eq!(data.group_means(), &[7.0]);
        assert_eq!(data.group_ranges(), &[0.0]);
    }

    #[test]
    fn non_finite_rejected_and_state_kept() {
        let mut data = Dataset::new();
        data.set_data(vec![vec![1.0, 2.0]]).unwrap();
        let err = data
            .set_data(vec![vec![1.0], vec![2.0, f64::INFINITY]])
            .unwrap_err();
        assert!(matches!(
            err,
            SpcError::NonFiniteValue {
                group: 1,
                index: 1,
                ..
            }
        ));
        assert_eq!(data.flattened(), &[1.0, 2.0]);
    }

    #[test]
    fn import_drops_empty_groups() {
        let mut data = Dataset::new();
        let kept = data
            .import(vec![vec![], vec![1.0, 2.0], vec![], vec![3.0]])
            .unwrap();
        assert_eq!(kept, 2);
        assert_eq!(data.groups().len(), 2);
    }

    #[test]
    fn aggregate_of_empty_group_is_none() {
        assert!(GroupAggregate::of(&[]).is_none());
        let a = GroupAggregate::of(&[4.0, 1.0, 7.0]).unwrap();
        assert!((a.mean - 4.0).abs() < 1e-12);
        assert_eq!(a.range, 6.0);
    }

    #[test]
    fn generated_shape_matches_request() {
        let mut rng = StdRng::seed_from_u64(7);
        let groups = generate_sample_data_with(&mut rng, 12, 4, 100.0, 10.0).unwrap();
        assert_eq!(groups.len(), 12);
        assert!(groups.iter().all(|g| g.len() == 4));
        assert!(groups.iter().flatten().all(|x| x.is_finite()));
    }

    #[test]
    fn generation_scales_every_fifth_group() {
        // With zero spread every sample equals the mean, exposing the factor.
        let mut rng = StdRng::seed_from_u64(1);
        let groups = generate_sample_data_with(&mut rng, 11, 3, 50.0, 0.0).unwrap();
        for (i, g) in groups.iter().enumerate() {
            let expected = if i % 5 == 0 { 60.0 } else { 50.0 };
            for &x in g {
                assert!((x - expected).abs() < 1e-9, "group {i}: {x}");
            }
        }
    }

    #[test]
    fn generation_rejects_bad_parameters() {
        assert!(matches!(
            generate_sample_data(2, 2, 0.0, -1.0),
            Err(SpcError::InvalidDistribution { .. })
        ));
        assert!(generate_sample_data(2, 2, f64::NAN, 1.0).is_err());
        assert!(generate_sample_data(2, 2, 0.0, f64::INFINITY).is_err());
        assert!(generate_sample_data(2, 2, 0.0, f64::NAN).is_err());
        assert!(generate_sample_data(2, 2, 0.0, -0.5).is_err());
    }

    #[test]
    fn negative_spread_keeps_current_data() {
        let mut data = Dataset::from_groups(vec![vec![1.0, 2.0]]).unwrap();
        let err = data.generate(3, 3, 10.0, -1.0).unwrap_err();
        assert_eq!(
            err,
            SpcError::InvalidDistribution {
                mean: 10.0,
                std_dev: -1.0
            }
        );
        assert_eq!(data.flattened(), &[1.0, 2.0]);
    }

    #[test]
    fn generate_populates_store() {
        let mut data = Dataset::new();
        data.generate(25, 5, 100.0, 10.0).unwrap();
        assert_eq!(data.groups().len(), 25);
        assert_eq!(data.flattened().len(), 125);
        assert_eq!(data.group_means().len(), 25);
    }

    #[test]
    fn read_only_analyses_do_not_mutate() {
        let data = Dataset::from_groups(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let first = data.overall_stats();
        let _ = data.control_chart();
        let _ = data.assess_process(0.0, 7.0);
        let second = data.overall_stats();
        assert_eq!(first, second);
    }
}
