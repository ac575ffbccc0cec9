//! Engine defaults.
//!
//! Parameters an [`Operation`](crate::engine::Operation) leaves unset are
//! taken from an [`EngineConfig`], which can be loaded from TOML:
//!
//! ```toml
//! [generation]
//! groups = 25
//! samples-per-group = 5
//! mean = 100.0
//! std-dev = 10.0
//!
//! [specification]
//! lsl = 70.0
//! usl = 130.0
//!
//! [mean-test]
//! expected-mean = 100.0
//! alpha = 0.05
//!
//! [histogram]
//! bins = 10
//! ```
//!
//! Every key is optional.

use serde::{Deserialize, Serialize};

use crate::distribution::DEFAULT_BINS;
use crate::error::{Result, SpcError};

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct EngineConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub specification: SpecificationConfig,
    #[serde(default)]
    pub mean_test: MeanTestConfig,
    #[serde(default)]
    pub histogram: HistogramConfig,
}

impl EngineConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| SpcError::Config(e.to_string()))
    }
}

/// Defaults for synthetic data generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GenerationConfig {
    #[serde(default = "default_groups")]
    pub groups: usize,
    #[serde(default = "default_samples_per_group")]
    pub samples_per_group: usize,
    #[serde(default = "default_mean")]
    pub mean: f64,
    #[serde(default = "default_std_dev")]
    pub std_dev: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            groups: default_groups(),
            samples_per_group: default_samples_per_group(),
            mean: default_mean(),
            std_dev: default_std_dev(),
        }
    }
}

/// Default specification limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SpecificationConfig {
    #[serde(default = "default_lsl")]
    pub lsl: f64,
    #[serde(default = "default_usl")]
    pub usl: f64,
}

impl Default for SpecificationConfig {
    fn default() -> Self {
        Self {
            lsl: default_lsl(),
            usl: default_usl(),
        }
    }
}

/// Defaults for the mean test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MeanTestConfig {
    #[serde(default = "default_mean")]
    pub expected_mean: f64,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

impl Default for MeanTestConfig {
    fn default() -> Self {
        Self {
            expected_mean: default_mean(),
            alpha: default_alpha(),
        }
    }
}

/// Histogram defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HistogramConfig {
    #[serde(default = "default_bins")]
    pub bins: usize,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            bins: default_bins(),
        }
    }
}

fn default_groups() -> usize {
    25
}

fn default_samples_per_group() -> usize {
    5
}

fn default_mean() -> f64 {
    100.0
}

fn default_std_dev() -> f64 {
    10.0
}

fn default_lsl() -> f64 {
    70.0
}

fn default_usl() -> f64 {
    130.0
}

fn default_alpha() -> f64 {
    0.05
}

fn default_bins() -> usize {
    DEFAULT_BINS
}
