//! Process capability analysis.
//!
//! Computes capability indices of the flattened sample against a pair of
//! specification limits.
//!
//! # Indices
//!
//! - **Cp** — Potential capability (spread vs tolerance)
//! - **Cpk** — Actual capability (centering considered)
//! - **Pp**, **Ppk** — Performance indices, equal to Cp and Cpk here
//! - **Cpm** — Taguchi capability (deviation from the specification midpoint)
//! - **k** — Centering offset
//!
//! # Defect rates
//!
//! - [`expected_ppm`] / [`observed_ppm`] — Modelled and counted PPM
//! - [`sigma_to_ppm`] / [`ppm_to_sigma`] — Sigma quality level conversions
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.

mod indices;
mod sigma_level;

pub use indices::{capability_indices, within_sigma, CapabilityIndices, PpmSummary, SigmaSummary};
pub use sigma_level::{expected_ppm, observed_ppm, ppm_to_sigma, sigma_to_ppm};
