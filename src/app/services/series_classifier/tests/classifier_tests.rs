//! Tests for subset classification

use super::*;
use crate::app::models::{RawObservation, SubsetKind};
use crate::app::services::series_classifier::{ClassificationStats, SeriesClassifier};

#[test]
fn test_subsets_follow_thresholds() {
    let series = create_test_series(
        "1041000",
        &[
            (day(2020, 1, 1), "0"),
            (day(2020, 1, 2), "0.05"),
            (day(2020, 1, 3), "0.1"),
            (day(2020, 1, 4), "0.9"),
            (day(2020, 1, 5), "1.0"),
            (day(2020, 1, 6), "25.3"),
            (day(2020, 1, 7), "-1"),
        ],
    );

    let classified = SeriesClassifier::new(1.0).classify(&series);

    assert_eq!(classified.all.len(), 7);
    assert_eq!(classified.valid.len(), 6);
    assert_eq!(classified.nonzero.len(), 4);
    assert_eq!(classified.above_threshold.len(), 2);
    assert_eq!(classified.subset(SubsetKind::Valid).kind(), SubsetKind::Valid);
}

#[test]
fn test_non_numeric_and_blank_cells_are_dropped() {
    let mut series = create_test_series(
        "1041000",
        &[
            (day(2020, 1, 1), "3.2"),
            (day(2020, 1, 2), "abc"),
            (day(2020, 1, 3), ""),
        ],
    );
    series
        .observations
        .push(RawObservation::missing(day(2020, 1, 4)));

    let classified = SeriesClassifier::new(1.0).classify(&series);

    assert_eq!(classified.all.len(), 1);
    assert_eq!(classified.stats.raw_rows, 4);
    assert_eq!(classified.stats.unparsable, 1);
}

#[test]
fn test_duplicate_days_keep_first_numeric_reading() {
    let series = create_test_series(
        "1041000",
        &[
            (day(2020, 1, 2), "5.0"),
            (day(2020, 1, 1), "1.0"),
            (day(2020, 1, 2), "9.0"),
        ],
    );

    let classified = SeriesClassifier::new(1.0).classify(&series);

    let values: Vec<f64> = classified.all.values().iter().map(|v| v.value).collect();
    assert_eq!(values, vec![1.0, 5.0]);
    assert_eq!(classified.stats.duplicates_removed, 1);
    assert_eq!(classified.all.first_date(), Some(day(2020, 1, 1)));
}

#[test]
fn test_missing_first_reading_does_not_shadow_later_value() {
    let series = create_test_series(
        "1041000",
        &[(day(2020, 1, 1), "--"), (day(2020, 1, 1), "4.4")],
    );

    let classified = SeriesClassifier::new(1.0).classify(&series);

    assert_eq!(classified.all.len(), 1);
    assert_eq!(classified.all.values()[0].value, 4.4);
    assert_eq!(classified.stats.duplicates_removed, 0);
}

#[test]
fn test_subset_monotonicity_for_various_thresholds() {
    let cells: Vec<(chrono::NaiveDate, String)> = (0..60)
        .map(|i| {
            let value = (i as f64 - 10.0) * 0.37;
            (day(2019, 1, 1) + chrono::Duration::days(i), format!("{value}"))
        })
        .collect();
    let borrowed: Vec<_> = cells.iter().map(|(d, s)| (*d, s.as_str())).collect();
    let series = create_test_series("1041000", &borrowed);

    for threshold in [0.0, 0.1, 0.5, 1.0, 2.5, 100.0] {
        let classified = SeriesClassifier::new(threshold).classify(&series);
        assert!(classified.nonzero.len() <= classified.valid.len());
        assert!(classified.valid.len() <= classified.all.len());
        assert!(classified.above_threshold.len() <= classified.valid.len());
    }
}

#[test]
fn test_configurable_threshold() {
    let series = create_test_series(
        "1041000",
        &[
            (day(2020, 1, 1), "2.0"),
            (day(2020, 1, 2), "4.9"),
            (day(2020, 1, 3), "5.0"),
        ],
    );

    let default_rule = SeriesClassifier::new(1.0).classify(&series);
    let strict_rule = SeriesClassifier::new(5.0).classify(&series);

    assert_eq!(default_rule.above_threshold.len(), 3);
    assert_eq!(strict_rule.above_threshold.len(), 1);
    assert_eq!(strict_rule.nonzero.len(), 3);
}

#[test]
fn test_empty_series() {
    let series = create_test_series("1041000", &[]);
    let classified = SeriesClassifier::new(1.0).classify(&series);

    assert!(classified.all.is_empty());
    assert!(classified.valid.is_empty());
    assert_eq!(classified.stats, ClassificationStats::default());
}
