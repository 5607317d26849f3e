//! Tests for output table emission


use crate::app::models::{LedgerEntry, ObservationSeries, RawObservation, StationDescriptor};
use crate::app::services::batch::{CompiledResults, ResultCompiler};
use crate::app::services::date_range::DateSpan;
use crate::app::services::ledger::LedgerTable;
use crate::app::services::series_classifier::SeriesClassifier;
use crate::app::services::statistics::StationAnalyzer;
use crate::config::YearRatioMode;
use chrono::NaiveDate;

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn add_station(compiler: &mut ResultCompiler, code: &str, values: &[(NaiveDate, &str)]) {
    let series = ObservationSeries::new(
        code,
        values
            .iter()
            .map(|(date, raw)| RawObservation::new(*date, *raw))
            .collect(),
    );
    let classified = SeriesClassifier::new(1.0).classify(&series);
    let span = DateSpan::between(classified.all.first_date(), classified.all.last_date()).unwrap();
    let report = StationAnalyzer::new(YearRatioMode::Historical, true).analyze(
        &classified,
        span,
        series.len(),
    );
    let station = StationDescriptor::new(code, format!("STATION {code}"), -10.0, -40.0);
    compiler.add_station(&station, report, &classified.valid);
}

/// Two stations with overlapping and disjoint days
pub fn sample_results() -> CompiledResults {
    let mut compiler = ResultCompiler::new();
    add_station(
        &mut compiler,
        "A",
        &[(day(2000, 1, 1), "1.5"), (day(2000, 1, 2), "0"), (day(2001, 3, 1), "12")],
    );
    add_station(
        &mut compiler,
        "B",
        &[(day(2000, 1, 2), "3"), (day(2000, 1, 5), "-1"), (day(2000, 2, 1), "0.2")],
    );
    compiler.finish()
}

pub fn sample_history() -> LedgerTable {
    let station = StationDescriptor::new("A", "STATION A", -10.0, -40.0);
    LedgerTable::new(
        LedgerEntry::header(),
        vec![LedgerEntry::ok(&station, 3, day(2000, 1, 1), day(2001, 3, 1)).to_row()],
    )
}
