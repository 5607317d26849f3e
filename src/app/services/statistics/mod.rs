//! Statistics and completeness for classified station series
//!
//! # Architecture
//!
//! - [`descriptive`] - Fixed statistics block (mean, mode, dispersion, percentiles)
//! - [`percentile`] - Linear-interpolation quantiles
//! - [`completeness`] - Calendar-aware completeness indices (IDV)
//! - [`report`] - Per-station report across overall, monthly and yearly resolution
//!
//! Every block is computed independently for each subset, so a station always
//! yields four blocks per period key.

pub mod completeness;
pub mod descriptive;
pub mod percentile;
pub mod report;

#[cfg(test)]
pub mod tests;

pub use completeness::{CompletenessEngine, CompletenessIndex};
pub use descriptive::{StatisticsBlock, StatisticsSet, compute_statistics};
pub use report::{OverallSummary, PeriodSummary, StationAnalyzer, StationReport};
