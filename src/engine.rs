//! Operation dispatch over one session's dataset.
//!
//! An [`Engine`] owns a [`Dataset`] and an [`EngineConfig`]. Each request is
//! an [`Operation`]; [`Engine::execute`] runs it and returns the matching
//! [`Outcome`]. Parameters an operation leaves as `None` come from the
//! config. Transport, routing and encoding belong to the caller, which can
//! map endpoint names to operations with [`Operation::from_name`].
//!
//! # Examples
//!
//! ```
//! use u_spc::engine::{Engine, Operation, Outcome};
//!
//! let mut engine = Engine::new();
//! engine
//!     .execute(Operation::ImportData {
//!         groups: vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
//!     })
//!     .unwrap();
//!
//! match engine.execute(Operation::ControlChart).unwrap() {
//!     Outcome::ControlChart(chart) => assert_eq!(chart.means, vec![2.0, 5.0]),
//!     other => panic!("unexpected outcome {other:?}"),
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::assessment::ProcessAssessment;
use crate::capability::CapabilityIndices;
use crate::config::EngineConfig;
use crate::dataset::Dataset;
use crate::descriptive::{DescriptiveStats, GroupSummary};
use crate::error::{Result, SpcError};
use crate::spc::ControlChartResult;
use crate::testing::{MeanTestResult, NormalityResult};

/// One request against the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Replaces the dataset with generated normal samples.
    GenerateData {
        groups: Option<usize>,
        samples_per_group: Option<usize>,
        mean: Option<f64>,
        std_dev: Option<f64>,
    },
    /// Replaces the dataset with caller-supplied groups; empty groups are
    /// dropped.
    ImportData { groups: Vec<Vec<f64>> },
    DescriptiveStats { bins: Option<usize> },
    NormalityTest,
    MeanTest {
        expected_mean: Option<f64>,
        alpha: Option<f64>,
    },
    CapabilityIndices { lsl: Option<f64>, usl: Option<f64> },
    ControlChart,
    ProcessAssessment { lsl: Option<f64>, usl: Option<f64> },
    /// Every analysis at once, histogram bins taken from the config.
    AllAnalysis {
        lsl: Option<f64>,
        usl: Option<f64>,
        expected_mean: Option<f64>,
        alpha: Option<f64>,
    },
}

impl Operation {
    /// Endpoint name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GenerateData { .. } => "generate-data",
            Operation::ImportData { .. } => "import-data",
            Operation::DescriptiveStats { .. } => "descriptive-stats",
            Operation::NormalityTest => "normality-test",
            Operation::MeanTest { .. } => "mean-test",
            Operation::CapabilityIndices { .. } => "capability-indices",
            Operation::ControlChart => "control-chart",
            Operation::ProcessAssessment { .. } => "process-assessment",
            Operation::AllAnalysis { .. } => "all-analysis",
        }
    }

    /// Parses an endpoint name, with or without a leading `/`.
    ///
    /// Every parameter of the returned operation is unset; `import-data`
    /// carries no groups.
    pub fn from_name(name: &str) -> Option<Self> {
        let op = match name.trim_start_matches('/') {
            "generate-data" => Operation::GenerateData {
                groups: None,
                samples_per_group: None,
                mean: None,
                std_dev: None,
            },
            "import-data" => Operation::ImportData { groups: Vec::new() },
            "descriptive-stats" => Operation::DescriptiveStats { bins: None },
            "normality-test" => Operation::NormalityTest,
            "mean-test" => Operation::MeanTest {
                expected_mean: None,
                alpha: None,
            },
            "capability-indices" => Operation::CapabilityIndices {
                lsl: None,
                usl: None,
            },
            "control-chart" => Operation::ControlChart,
            "process-assessment" => Operation::ProcessAssessment {
                lsl: None,
                usl: None,
            },
            "all-analysis" => Operation::AllAnalysis {
                lsl: None,
                usl: None,
                expected_mean: None,
                alpha: None,
            },
            _ => return None,
        };
        Some(op)
    }

    /// `true` for operations that only read the dataset.
    pub fn is_analysis(&self) -> bool {
        !matches!(
            self,
            Operation::GenerateData { .. } | Operation::ImportData { .. }
        )
    }
}

/// Overall statistics, the averaged group summary and histogram centers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveReport {
    pub overall: DescriptiveStats,
    pub group_summary: GroupSummary,
    pub histogram: Vec<f64>,
}

/// Process assessment with the Cp and Cpk it was based on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub assessment: ProcessAssessment,
    pub cp: f64,
    pub cpk: f64,
}

/// Every analysis of one dataset snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullAnalysis {
    pub descriptive_stats: DescriptiveStats,
    pub normality_test: NormalityResult,
    pub mean_test: MeanTestResult,
    pub capability_indices: CapabilityIndices,
    pub control_chart: ControlChartResult,
    pub process_assessment: ProcessAssessment,
    pub histogram: Vec<f64>,
}

/// Result of [`Engine::execute`], one variant per [`Operation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    /// The generated groups, now the current dataset.
    Generated(Vec<Vec<f64>>),
    /// Number of groups kept by an import.
    Imported { count: usize },
    Descriptive(DescriptiveReport),
    Normality(NormalityResult),
    MeanTest(MeanTestResult),
    Capability(CapabilityIndices),
    ControlChart(ControlChartResult),
    Assessment(AssessmentReport),
    AllAnalysis(Box<FullAnalysis>),
}

/// One analysis session.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    dataset: Dataset,
    config: EngineConfig,
}

impl Engine {
    /// An engine with an empty dataset and default config.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            dataset: Dataset::new(),
            config,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one operation.
    ///
    /// # Errors
    ///
    /// - [`SpcError::NoData`] for an analysis while no groups are loaded.
    /// - [`SpcError::InvalidDistribution`] for generation with a bad mean or
    ///   standard deviation.
    /// - [`SpcError::NonFiniteValue`] for an import containing NaN or ±∞.
    ///
    /// A failed operation leaves the dataset unchanged.
    pub fn execute(&mut self, op: Operation) -> Result<Outcome> {
        debug!(operation = op.name(), "executing");

        if op.is_analysis() && self.dataset.is_empty() {
            warn!(operation = op.name(), "no data available");
            return Err(SpcError::NoData);
        }

        let spec = self.config.specification;
        let mean_cfg = self.config.mean_test;

        let outcome = match op {
            Operation::GenerateData {
                groups,
                samples_per_group,
                mean,
                std_dev,
            } => {
                let defaults = self.config.generation;
                self.dataset.generate(
                    groups.unwrap_or(defaults.groups),
                    samples_per_group.unwrap_or(defaults.samples_per_group),
                    mean.unwrap_or(defaults.mean),
                    std_dev.unwrap_or(defaults.std_dev),
                )?;
                Outcome::Generated(self.dataset.groups().to_vec())
            }
            Operation::ImportData { groups } => Outcome::Imported {
                count: self.dataset.import(groups)?,
            },
            Operation::DescriptiveStats { bins } => Outcome::Descriptive(DescriptiveReport {
                overall: self.dataset.overall_stats(),
                group_summary: GroupSummary::from_group_stats(&self.dataset.group_stats()),
                histogram: self
                    .dataset
                    .histogram(bins.unwrap_or(self.config.histogram.bins)),
            }),
            Operation::NormalityTest => Outcome::Normality(self.dataset.test_normality()),
            Operation::MeanTest {
                expected_mean,
                alpha,
            } => Outcome::MeanTest(self.dataset.test_mean(
                expected_mean.unwrap_or(mean_cfg.expected_mean),
                alpha.unwrap_or(mean_cfg.alpha),
            )),
            Operation::CapabilityIndices { lsl, usl } => Outcome::Capability(
                self.dataset
                    .capability_indices(lsl.unwrap_or(spec.lsl), usl.unwrap_or(spec.usl)),
            ),
            Operation::ControlChart => Outcome::ControlChart(self.dataset.control_chart()),
            Operation::ProcessAssessment { lsl, usl } => {
                let lsl = lsl.unwrap_or(spec.lsl);
                let usl = usl.unwrap_or(spec.usl);
                let indices = self.dataset.capability_indices(lsl, usl);
                Outcome::Assessment(AssessmentReport {
                    assessment: self.dataset.assess_process(lsl, usl),
                    cp: indices.cp,
                    cpk: indices.cpk,
                })
            }
            Operation::AllAnalysis {
                lsl,
                usl,
                expected_mean,
                alpha,
            } => {
                let lsl = lsl.unwrap_or(spec.lsl);
                let usl = usl.unwrap_or(spec.usl);
                Outcome::AllAnalysis(Box::new(FullAnalysis {
                    descriptive_stats: self.dataset.overall_stats(),
                    normality_test: self.dataset.test_normality(),
                    mean_test: self.dataset.test_mean(
                        expected_mean.unwrap_or(mean_cfg.expected_mean),
                        alpha.unwrap_or(mean_cfg.alpha),
                    ),
                    capability_indices: self.dataset.capability_indices(lsl, usl),
                    control_chart: self.dataset.control_chart(),
                    process_assessment: self.dataset.assess_process(lsl, usl),
                    histogram: self.dataset.histogram(self.config.histogram.bins),
                }))
            }
        };

        Ok(outcome)
    }
}
