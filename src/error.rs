//! Crate error type.
//!
//! Only the data boundary is fallible: replacing the dataset, generating
//! synthetic data, loading configuration, and asking the engine for an
//! analysis before any data was loaded. The calculators themselves return
//! default records for empty input instead of failing.

use thiserror::Error;

/// Errors raised at the boundary of the SPC engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpcError {
    /// A measurement was NaN or infinite.
    #[error("non-finite value {value} at group {group}, index {index}")]
    NonFiniteValue {
        /// Zero-based group position in the submitted dataset.
        group: usize,
        /// Zero-based position within the group.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Parameters rejected by the normal sampler.
    #[error("invalid normal distribution parameters (mean = {mean}, std_dev = {std_dev})")]
    InvalidDistribution { mean: f64, std_dev: f64 },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An analysis was requested before any dataset was loaded.
    #[error("no data available")]
    NoData,
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SpcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_message_names_position() {
        let err = SpcError::NonFiniteValue {
            group: 2,
            index: 4,
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "non-finite value NaN at group 2, index 4");
    }

    #[test]
    fn no_data_message() {
        assert_eq!(SpcError::NoData.to_string(), "no data available");
    }
}
