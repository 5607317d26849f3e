//! Tests for the series classifier module

pub mod classifier_tests;

use crate::app::models::{ObservationSeries, RawObservation};
use chrono::NaiveDate;

/// Build a day from its parts
pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Build a series from `(day, raw cell)` pairs
pub fn create_test_series(code: &str, cells: &[(NaiveDate, &str)]) -> ObservationSeries {
    ObservationSeries::new(
        code,
        cells
            .iter()
            .map(|(date, raw)| RawObservation::new(*date, *raw))
            .collect(),
    )
}
