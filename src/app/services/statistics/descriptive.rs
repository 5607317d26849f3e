//! Descriptive statistics blocks
//!
//! A [`StatisticsBlock`] is computed the same way for every subset and every
//! period: the period only decides which values are handed to
//! [`compute_statistics`].

use super::percentile::quantile_sorted;
use crate::app::models::{PeriodKey, Subset, SubsetKind};
use crate::app::services::series_classifier::ClassifiedSeries;
use crate::constants::{MONTH_SCALE, YEAR_SCALE};

/// Fixed statistics block over one subset and period
///
/// Every field except `count` is `None` when it is undefined for the sample
/// (empty sample, or dispersion of a single value).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatisticsBlock {
    pub count: usize,
    pub mean: Option<f64>,
    /// `mean * 30`
    pub mean_monthly: Option<f64>,
    /// `mean * 365`
    pub mean_yearly: Option<f64>,
    pub median: Option<f64>,
    /// Most frequent value; the smallest one on ties
    pub mode: Option<f64>,
    pub max: Option<f64>,
    pub min: Option<f64>,
    /// Sample standard deviation (n - 1)
    pub std_dev: Option<f64>,
    /// Sample variance (n - 1)
    pub variance: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub p90: Option<f64>,
    pub p95: Option<f64>,
    pub p99: Option<f64>,
}

impl StatisticsBlock {
    /// Column suffixes in output order, aligned with [`StatisticsBlock::values`]
    pub const FIELD_NAMES: [&'static str; 15] = [
        "mean", "mean_x30", "mean_x365", "median", "mode", "max", "min", "std", "var", "p25",
        "p50", "p75", "p90", "p95", "p99",
    ];

    /// Block for an empty sample
    pub fn empty() -> Self {
        Self::default()
    }

    /// Field values aligned with [`StatisticsBlock::FIELD_NAMES`]
    pub fn values(&self) -> [Option<f64>; 15] {
        [
            self.mean,
            self.mean_monthly,
            self.mean_yearly,
            self.median,
            self.mode,
            self.max,
            self.min,
            self.std_dev,
            self.variance,
            self.p25,
            self.p50,
            self.p75,
            self.p90,
            self.p95,
            self.p99,
        ]
    }

    /// Percentiles in ascending order
    pub fn percentiles(&self) -> [Option<f64>; 6] {
        [self.p25, self.p50, self.p75, self.p90, self.p95, self.p99]
    }
}

/// Compute a statistics block over a sample
///
/// Pure: identical input always yields an identical block.
pub fn compute_statistics(values: impl IntoIterator<Item = f64>) -> StatisticsBlock {
    let mut sorted: Vec<f64> = values.into_iter().collect();
    if sorted.is_empty() {
        return StatisticsBlock::empty();
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;

    let variance = if count > 1 {
        let squares: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
        Some(squares / (count - 1) as f64)
    } else {
        None
    };

    let quantile = |q: f64| quantile_sorted(&sorted, q);

    StatisticsBlock {
        count,
        mean: Some(mean),
        mean_monthly: Some(mean * MONTH_SCALE),
        mean_yearly: Some(mean * YEAR_SCALE),
        median: quantile(0.5),
        mode: smallest_mode(&sorted),
        max: sorted.last().copied(),
        min: sorted.first().copied(),
        std_dev: variance.map(f64::sqrt),
        variance,
        p25: quantile(0.25),
        p50: quantile(0.50),
        p75: quantile(0.75),
        p90: quantile(0.90),
        p95: quantile(0.95),
        p99: quantile(0.99),
    }
}

/// Statistics of a subset restricted to one period
pub fn statistics_for_period(subset: &Subset, period: PeriodKey) -> StatisticsBlock {
    compute_statistics(subset.in_period(period))
}

/// Most frequent value of an ascending sample, the smallest on ties
fn smallest_mode(sorted: &[f64]) -> Option<f64> {
    let mut best: Option<(f64, usize)> = None;
    let mut run_start = 0;

    while run_start < sorted.len() {
        let value = sorted[run_start];
        let run_len = sorted[run_start..]
            .iter()
            .take_while(|v| **v == value)
            .count();

        // Strictly greater keeps the earlier (smaller) value on ties
        if best.is_none_or(|(_, count)| run_len > count) {
            best = Some((value, run_len));
        }
        run_start += run_len;
    }

    best.map(|(value, _)| value)
}

/// Statistics blocks for every subset over one period
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatisticsSet {
    pub all: StatisticsBlock,
    pub valid: StatisticsBlock,
    pub above_threshold: StatisticsBlock,
    pub nonzero: StatisticsBlock,
}

impl StatisticsSet {
    /// Compute the blocks of every subset of a classified series for a period
    pub fn for_period(classified: &ClassifiedSeries, period: PeriodKey) -> Self {
        Self {
            all: statistics_for_period(&classified.all, period),
            valid: statistics_for_period(&classified.valid, period),
            above_threshold: statistics_for_period(&classified.above_threshold, period),
            nonzero: statistics_for_period(&classified.nonzero, period),
        }
    }

    pub fn get(&self, kind: SubsetKind) -> &StatisticsBlock {
        match kind {
            SubsetKind::All => &self.all,
            SubsetKind::Valid => &self.valid,
            SubsetKind::AboveThreshold => &self.above_threshold,
            SubsetKind::Nonzero => &self.nonzero,
        }
    }
}
