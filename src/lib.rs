//! # u-spc
//!
//! Statistical process control engine for grouped measurement data.
//!
//! A session loads subgroups of real-valued measurements (generated or
//! imported) and answers analyses over the current snapshot: descriptive
//! statistics, a normality check, a one-sample mean test, process
//! capability indices, an X-bar/R control chart, a qualitative process
//! assessment and histogram bin centers.
//!
//! ## Modules
//!
//! - [`dataset`] — The grouped dataset, its aggregates and synthetic data generation
//! - [`descriptive`] — Mean, median, variance, moments and per-group statistics
//! - [`testing`] — Approximate Shapiro-Wilk normality test and the mean test
//! - [`capability`] — Capability indices (Cp, Cpk, Pp, Ppk, Cpm), sigma summaries, PPM
//! - [`spc`] — X-bar/R control chart with the A2/D3/D4 factor table
//! - [`assessment`] — Stability, capability level and recommendation text
//! - [`distribution`] — Histogram bin centers
//! - [`engine`] — Operation dispatch over one session
//! - [`config`] — TOML-loadable defaults for unset operation parameters
//! - [`error`] — Error type
//!
//! ## Design Philosophy
//!
//! - **Pure analyses**: every analysis is a function of the dataset snapshot
//! - **Defaults over failures**: empty input yields zero-valued records
//! - **IEEE propagation**: degenerate divisions return inf/NaN as computed

pub mod assessment;
pub mod capability;
pub mod config;
pub mod dataset;
pub mod descriptive;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod spc;
pub mod testing;

pub use config::EngineConfig;
pub use dataset::Dataset;
pub use engine::{Engine, Operation, Outcome};
pub use error::{Result, SpcError};
