//! Batch processing of a station inventory
//!
//! # Architecture
//!
//! - [`orchestrator`] - Sequential per-station state machine
//! - [`compiler`] - Combined matrix and summary tables
//! - [`stats`] - Batch counters and summary line

pub mod compiler;
pub mod orchestrator;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use compiler::{AnnualRow, CompiledResults, PeriodRow, ResultCompiler, SeriesMatrix};
pub use orchestrator::{BatchOutcome, BatchProcessor, NoDataReason, StationOutcome};
pub use stats::BatchStats;
