//! Tests for the statistics module

pub mod completeness_tests;

use crate::app::models::{ObservationSeries, RawObservation};
use crate::app::services::series_classifier::{ClassifiedSeries, SeriesClassifier};
use chrono::NaiveDate;

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Classify `(day, value)` pairs with the default 1.0 mm threshold
pub fn classify_values(code: &str, values: &[(NaiveDate, f64)]) -> ClassifiedSeries {
    let series = ObservationSeries::new(
        code,
        values
            .iter()
            .map(|(date, value)| RawObservation::new(*date, value.to_string()))
            .collect(),
    );
    SeriesClassifier::new(1.0).classify(&series)
}
