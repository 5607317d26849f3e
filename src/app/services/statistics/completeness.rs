//! Completeness indices (IDV) at overall, monthly and yearly resolution
//!
//! A completeness ratio is the share of possible days in a period for which a
//! subset has an observation, as a percentage. Denominators are calendar
//! aware: leap Februaries count 29 days and yearly denominators come from the
//! actual day range of the year.

use crate::app::models::PeriodKey;
use crate::app::services::series_classifier::ClassifiedSeries;
use crate::config::YearRatioMode;
use crate::constants::THIRTY_DAY_MONTHS;
use chrono::NaiveDate;

/// Gregorian leap-year rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a calendar month of a given year
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if month == 2 {
        if is_leap_year(year) { 29 } else { 28 }
    } else if THIRTY_DAY_MONTHS.contains(&month) {
        30
    } else {
        31
    }
}

/// Possible days of `month` summed over every year in `[first_year, last_year]`
pub fn month_denominator(month: u32, first_year: i32, last_year: i32) -> i64 {
    month_days_over_years(month, first_year..=last_year)
}

/// Possible days of `month` summed over an arbitrary set of years
pub fn month_days_over_years(month: u32, years: impl IntoIterator<Item = i32>) -> i64 {
    years
        .into_iter()
        .map(|year| days_in_month(year, month) as i64)
        .sum()
}

/// Number of days produced by walking `[year-01-01, year-12-31]`
pub fn days_in_year(year: i32) -> i64 {
    let (Some(first), Some(last)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
        return 0;
    };

    first.iter_days().take_while(|day| *day <= last).count() as i64
}

/// `count / denominator * 100`, or 0 when the denominator is absent or zero
pub fn ratio(count: usize, denominator: Option<i64>) -> f64 {
    match denominator {
        Some(days) if days > 0 => count as f64 / days as f64 * 100.0,
        _ => 0.0,
    }
}

/// Approximate number of years with sufficient data
///
/// `ceil(total_years * valid_ratio / 100)`. Station selection filters are
/// calibrated on this exact value, partial years included.
pub fn valid_years_count(total_years: Option<i64>, valid_ratio: f64) -> i64 {
    total_years
        .map(|years| (years as f64 * valid_ratio / 100.0).ceil() as i64)
        .unwrap_or(0)
}

/// Approximate number of valid days in a period: `ceil(period_days * ratio / 100)`
pub fn valid_days_estimate(period_days: Option<i64>, valid_ratio: f64) -> i64 {
    period_days
        .map(|days| (days as f64 * valid_ratio / 100.0).ceil() as i64)
        .unwrap_or(0)
}

/// Completeness of one station over one period
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompletenessIndex {
    /// Possible days in the period
    pub period_days: Option<i64>,
    pub valid_count: usize,
    pub above_threshold_count: usize,
    pub nonzero_count: usize,
    /// IDV, percent
    pub valid_ratio: f64,
    /// IDV of the ABOVE_THRESHOLD subset, percent
    pub above_threshold_ratio: f64,
    /// IDV of the NONZERO subset, percent
    pub nonzero_ratio: f64,
}

impl CompletenessIndex {
    fn from_counts(
        period_days: Option<i64>,
        valid_count: usize,
        above_threshold_count: usize,
        nonzero_count: usize,
    ) -> Self {
        Self {
            period_days,
            valid_count,
            above_threshold_count,
            nonzero_count,
            valid_ratio: ratio(valid_count, period_days),
            above_threshold_ratio: ratio(above_threshold_count, period_days),
            nonzero_ratio: ratio(nonzero_count, period_days),
        }
    }
}

/// Computes completeness indices for classified series
#[derive(Debug, Clone, Copy)]
pub struct CompletenessEngine {
    year_ratio_mode: YearRatioMode,
}

impl CompletenessEngine {
    pub fn new(year_ratio_mode: YearRatioMode) -> Self {
        Self { year_ratio_mode }
    }

    /// Completeness over the whole observed span
    ///
    /// `total_days` comes from the date-range calculation; `None` or zero
    /// yields zero ratios.
    pub fn overall(
        &self,
        classified: &ClassifiedSeries,
        total_days: Option<i64>,
    ) -> CompletenessIndex {
        CompletenessIndex::from_counts(
            total_days,
            classified.valid.len(),
            classified.above_threshold.len(),
            classified.nonzero.len(),
        )
    }

    /// Completeness of one calendar month pooled over `[first_year, last_year]`
    pub fn month(
        &self,
        classified: &ClassifiedSeries,
        month: u32,
        first_year: i32,
        last_year: i32,
    ) -> CompletenessIndex {
        let period = PeriodKey::Month(month);
        let denominator = month_denominator(month, first_year, last_year);

        CompletenessIndex::from_counts(
            Some(denominator),
            classified.valid.count_in(period),
            classified.above_threshold.count_in(period),
            classified.nonzero.count_in(period),
        )
    }

    /// Completeness of one calendar year
    pub fn year(&self, classified: &ClassifiedSeries, year: i32) -> CompletenessIndex {
        let period = PeriodKey::Year(year);
        let denominator = Some(days_in_year(year));

        let valid_count = classified.valid.count_in(period);
        let above_threshold_count = classified.above_threshold.count_in(period);
        let nonzero_count = classified.nonzero.count_in(period);

        let mut index = CompletenessIndex::from_counts(
            denominator,
            valid_count,
            above_threshold_count,
            nonzero_count,
        );

        if self.year_ratio_mode == YearRatioMode::Historical {
            index.above_threshold_ratio = ratio(valid_count, denominator);
            index.nonzero_ratio = ratio(valid_count, denominator);
        }

        index
    }
}
