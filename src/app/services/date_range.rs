//! Observed date span of a station series
//!
//! Turns the first and last observation dates into the number of elapsed days
//! and the number of (started) years. A missing or unparsable bound yields
//! `None`, which downstream code treats as "insufficient data".

use crate::constants::{DATE_FORMATS, DATETIME_FORMATS, DAYS_PER_YEAR};
use chrono::{NaiveDate, NaiveDateTime};

/// Elapsed span between the first and last observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub date_min: NaiveDate,
    pub date_max: NaiveDate,
    /// Whole days from `date_min` to `date_max` (not inclusive of both ends)
    pub total_days: i64,
    /// `ceil(total_days / 365.25)`
    pub total_years: i64,
}

impl DateSpan {
    /// Compute the span between two bounds, `None` if either is absent
    pub fn between(date_min: Option<NaiveDate>, date_max: Option<NaiveDate>) -> Option<Self> {
        let (date_min, date_max) = (date_min?, date_max?);
        let total_days = (date_max - date_min).num_days();

        Some(Self {
            date_min,
            date_max,
            total_days,
            total_years: years_for_days(total_days),
        })
    }

    /// Compute the span from textual bounds
    pub fn from_strings(date_min: Option<&str>, date_max: Option<&str>) -> Option<Self> {
        Self::between(date_min.and_then(parse_day), date_max.and_then(parse_day))
    }
}

/// `(totalDays, totalYears)` for two optional bounds
pub fn calculate_span(
    date_min: Option<NaiveDate>,
    date_max: Option<NaiveDate>,
) -> (Option<i64>, Option<i64>) {
    match DateSpan::between(date_min, date_max) {
        Some(span) => (Some(span.total_days), Some(span.total_years)),
        None => (None, None),
    }
}

/// Number of started years covered by a day count
pub fn years_for_days(total_days: i64) -> i64 {
    (total_days as f64 / DAYS_PER_YEAR).ceil() as i64
}

/// Parse a day from any accepted date or date-time format
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        })
}
