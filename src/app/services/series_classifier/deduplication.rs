//! Date deduplication for classified series
//!
//! A series may contain several readings for the same day (overlapping source
//! pages, re-published months). The first reading in source order is kept and
//! later ones are discarded silently.

use crate::app::models::DailyValue;
use chrono::NaiveDate;
use std::collections::HashSet;

/// Keep the first value seen for each day and order the result by date
///
/// # Arguments
///
/// * `values` - `(day, value)` pairs in source order
///
/// # Returns
///
/// Tuple of (date-ordered unique values, number of duplicates removed)
pub fn deduplicate_first(values: Vec<(NaiveDate, f64)>) -> (Vec<DailyValue>, usize) {
    let input_count = values.len();
    let mut seen = HashSet::with_capacity(input_count);

    let mut unique: Vec<DailyValue> = values
        .into_iter()
        .filter(|(date, _)| seen.insert(*date))
        .map(|(date, value)| DailyValue { date, value })
        .collect();

    unique.sort_by_key(|v| v.date);
    let duplicates_removed = input_count - unique.len();

    (unique, duplicates_removed)
}

