//! Tests for the result compiler

use super::*;
use crate::app::models::{DailyValue, Subset, SubsetKind};
use crate::app::services::batch::{CompiledResults, ResultCompiler, SeriesMatrix};
use crate::app::services::date_range::DateSpan;
use crate::app::services::series_classifier::SeriesClassifier;
use crate::app::services::statistics::StationAnalyzer;
use crate::config::YearRatioMode;

fn valid_subset(values: &[(NaiveDate, f64)]) -> Subset {
    Subset::new(
        SubsetKind::Valid,
        values
            .iter()
            .map(|(date, value)| DailyValue {
                date: *date,
                value: *value,
            })
            .collect(),
    )
}

#[test]
fn test_matrix_outer_join() {
    let mut matrix = SeriesMatrix::new();
    matrix.add_column("A", &valid_subset(&[(day(2000, 1, 1), 1.0), (day(2000, 1, 3), 3.0)]));
    matrix.add_column("B", &valid_subset(&[(day(2000, 1, 2), 2.0), (day(2000, 1, 3), 0.0)]));

    assert_eq!(
        matrix.dates(),
        vec![day(2000, 1, 1), day(2000, 1, 2), day(2000, 1, 3)]
    );
    assert_eq!(matrix.station_codes(), vec!["A", "B"]);
    assert_eq!(matrix.column("A"), Some(vec![Some(1.0), None, Some(3.0)]));
    assert_eq!(matrix.column("B"), Some(vec![None, Some(2.0), Some(0.0)]));
    assert_eq!(matrix.column("C"), None);
    assert_eq!((matrix.width(), matrix.height()), (2, 3));
}

#[test]
fn test_compiler_collects_rows_per_station() {
    let series = create_test_series(
        "A",
        &[(day(2000, 1, 1), 1.0), (day(2000, 2, 1), 2.0), (day(2001, 1, 1), -3.0)],
    );
    let classified = SeriesClassifier::new(1.0).classify(&series);
    let span = DateSpan::between(classified.all.first_date(), classified.all.last_date()).unwrap();
    let report = StationAnalyzer::new(YearRatioMode::Historical, true).analyze(&classified, span, 3);
    let station = create_test_station("A");

    let mut compiler = ResultCompiler::new();
    compiler.add_station(&station, report, &classified.valid);
    let results = compiler.finish();

    assert_eq!(results.station_count(), 1);
    assert_eq!(results.annual[0].station.code, "A");
    assert_eq!(results.monthly.len(), 12);
    // VALID range is 2000 only; the negative 2001 reading is excluded
    assert_eq!(results.yearly.len(), 1);
    assert_eq!(results.monthly_for(2).len(), 1);
    assert_eq!(results.monthly_for(2)[0].summary.completeness.valid_count, 1);
    assert_eq!(results.matrix.height(), 2);
}

/// Compile one station per code, then pin its valid-years count and IDV
fn compiled_with_scores(scores: &[(&str, i64, f64)]) -> CompiledResults {
    let analyzer = StationAnalyzer::new(YearRatioMode::Historical, true);
    let mut compiler = ResultCompiler::new();

    for (code, _, _) in scores {
        let series = create_test_series(code, &[(day(2000, 1, 1), 1.0), (day(2000, 1, 2), 2.0)]);
        let classified = SeriesClassifier::new(1.0).classify(&series);
        let span =
            DateSpan::between(classified.all.first_date(), classified.all.last_date()).unwrap();
        let report = analyzer.analyze(&classified, span, 2);
        compiler.add_station(&create_test_station(code), report, &classified.valid);
    }

    let mut results = compiler.finish();
    for (row, (_, valid_years, valid_ratio)) in results.annual.iter_mut().zip(scores) {
        row.summary.valid_years = *valid_years;
        row.summary.completeness.valid_ratio = *valid_ratio;
    }
    results
}

#[test]
fn test_select_stations_thresholds_are_inclusive() {
    let results = compiled_with_scores(&[
        ("A", 24, 80.0),
        ("B", 23, 95.0),
        ("C", 30, 79.99),
        ("D", 25, 100.27),
    ]);

    let selected = results.select_stations(24, 80.0);

    let codes: Vec<_> = selected.annual.iter().map(|row| row.station.code.as_str()).collect();
    assert_eq!(codes, vec!["A", "D"]);
    assert_eq!(selected.monthly.len(), 24);
    assert!(selected
        .monthly_for(1)
        .iter()
        .all(|row| ["A", "D"].contains(&row.station.code.as_str())));
    assert_eq!(selected.yearly.len(), 2);
    assert_eq!(selected.matrix.station_codes(), vec!["A", "D"]);
    assert_eq!(results.station_count(), 4);
}

#[test]
fn test_select_stations_can_select_nothing() {
    let results = compiled_with_scores(&[("A", 10, 50.0)]);

    let selected = results.select_stations(24, 80.0);

    assert_eq!(selected.station_count(), 0);
    assert!(selected.monthly.is_empty());
    assert!(selected.yearly.is_empty());
    assert!(selected.matrix.is_empty());
}
