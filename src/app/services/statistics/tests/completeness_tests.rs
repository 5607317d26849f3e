//! Tests for completeness indices

use super::*;
use crate::app::services::statistics::completeness::{
    CompletenessEngine, days_in_month, days_in_year, month_days_over_years, month_denominator, ratio,
    valid_days_estimate, valid_years_count,
};
use crate::app::services::date_range::DateSpan;
use crate::config::YearRatioMode;

#[test]
fn test_leap_aware_february_denominator() {
    assert_eq!(days_in_month(2000, 2), 29);
    assert_eq!(days_in_month(1900, 2), 28);
    assert_eq!(days_in_month(2001, 2), 28);
    assert_eq!(month_denominator(2, 2000, 2001), 57);
    assert_eq!(month_denominator(2, 2000, 2004), 29 + 28 + 28 + 28 + 29);
    assert_eq!(month_days_over_years(2, [2000, 2001, 2004]), 86);
    assert_eq!(month_denominator(4, 2000, 2001), 60);
    assert_eq!(month_denominator(1, 2000, 2001), 62);
}

#[test]
fn test_year_denominator_counts_every_day() {
    assert_eq!(days_in_year(2000), 366);
    assert_eq!(days_in_year(2001), 365);
    assert_eq!(days_in_year(2100), 365);
}

#[test]
fn test_ratio_handles_missing_denominator() {
    assert_eq!(ratio(10, None), 0.0);
    assert_eq!(ratio(10, Some(0)), 0.0);
    assert_eq!(ratio(5, Some(10)), 50.0);
}

#[test]
fn test_valid_counts_round_up() {
    assert_eq!(valid_years_count(Some(2), 52.05), 2);
    assert_eq!(valid_years_count(Some(10), 100.0), 10);
    assert_eq!(valid_years_count(Some(10), 1.0), 1);
    assert_eq!(valid_years_count(None, 80.0), 0);
    assert_eq!(valid_days_estimate(Some(62), 50.0), 31);
    assert_eq!(valid_days_estimate(Some(31), 50.0), 16);
}

#[test]
fn test_overall_ratio_from_total_days() {
    let values: Vec<_> = (0..10)
        .map(|i| (day(2020, 1, 1) + chrono::Duration::days(i), if i < 5 { 2.0 } else { -1.0 }))
        .collect();
    let classified = classify_values("A", &values);

    let index = CompletenessEngine::new(YearRatioMode::Historical).overall(&classified, Some(20));

    assert_eq!(index.valid_count, 5);
    assert_eq!(index.valid_ratio, 25.0);
    assert_eq!(index.above_threshold_ratio, 25.0);

    let no_span = CompletenessEngine::new(YearRatioMode::Historical).overall(&classified, None);
    assert_eq!(no_span.valid_ratio, 0.0);
}

#[test]
fn test_month_pools_years() {
    let classified = classify_values(
        "A",
        &[
            (day(2000, 2, 1), 3.0),
            (day(2000, 2, 29), 0.0),
            (day(2001, 2, 10), 0.5),
            (day(2001, 3, 1), 9.0),
        ],
    );

    let index = CompletenessEngine::new(YearRatioMode::Corrected).month(&classified, 2, 2000, 2001);

    assert_eq!(index.period_days, Some(57));
    assert_eq!(index.valid_count, 3);
    assert_eq!(index.nonzero_count, 2);
    assert_eq!(index.above_threshold_count, 1);
    assert!((index.valid_ratio - 3.0 / 57.0 * 100.0).abs() < 1e-9);
}

#[test]
fn test_year_ratio_modes() {
    let classified = classify_values(
        "A",
        &[
            (day(2001, 1, 1), 0.0),
            (day(2001, 1, 2), 0.5),
            (day(2001, 1, 3), 4.0),
            (day(2001, 1, 4), 12.0),
        ],
    );

    let historical = CompletenessEngine::new(YearRatioMode::Historical).year(&classified, 2001);
    let corrected = CompletenessEngine::new(YearRatioMode::Corrected).year(&classified, 2001);
    let valid_ratio = 4.0 / 365.0 * 100.0;

    assert_eq!(historical.period_days, Some(365));
    assert_eq!(historical.valid_ratio, valid_ratio);
    assert_eq!(historical.nonzero_ratio, valid_ratio);
    assert_eq!(historical.above_threshold_ratio, valid_ratio);

    assert_eq!(corrected.valid_ratio, valid_ratio);
    assert_eq!(corrected.nonzero_ratio, 3.0 / 365.0 * 100.0);
    assert_eq!(corrected.above_threshold_ratio, 2.0 / 365.0 * 100.0);
    assert_eq!(historical.nonzero_count, corrected.nonzero_count);
}

#[test]
fn test_complete_series_overall_ratio_exceeds_hundred() {
    // Elapsed days exclude one end of the span, so a gapless year scores above 100
    let values: Vec<_> = day(2000, 1, 1)
        .iter_days()
        .take(366)
        .map(|date| (date, 2.0))
        .collect();
    let classified = classify_values("A", &values);
    let span = DateSpan::between(Some(day(2000, 1, 1)), Some(day(2000, 12, 31))).unwrap();

    let index = CompletenessEngine::new(YearRatioMode::Historical)
        .overall(&classified, Some(span.total_days));

    assert_eq!(span.total_days, 365);
    assert_eq!(span.total_years, 1);
    assert_eq!(index.valid_count, 366);
    assert!((index.valid_ratio - 100.27397260273973).abs() < 1e-9);
    assert_eq!(valid_years_count(Some(span.total_years), index.valid_ratio), 2);
}

#[test]
fn test_calendar_ratios_of_complete_series_are_hundred() {
    let values: Vec<_> = day(2000, 1, 1)
        .iter_days()
        .take(366)
        .map(|date| (date, 2.0))
        .collect();
    let classified = classify_values("A", &values);

    for mode in [YearRatioMode::Historical, YearRatioMode::Corrected] {
        let engine = CompletenessEngine::new(mode);
        let mut indices: Vec<_> = (1..=12).map(|m| engine.month(&classified, m, 2000, 2000)).collect();
        indices.push(engine.year(&classified, 2000));

        for index in indices {
            for ratio in [index.valid_ratio, index.above_threshold_ratio, index.nonzero_ratio] {
                assert_eq!(ratio, 100.0);
            }
        }
    }
}
