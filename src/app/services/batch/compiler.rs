//! Result compiler
//!
//! Accumulates the outputs of every successful station: the combined
//! time-series matrix and the overall, monthly and yearly summary rows.

use crate::app::models::{PeriodKey, StationDescriptor, Subset};
use crate::app::services::statistics::{OverallSummary, PeriodSummary, StationReport};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Outer join of station series on the union of their dates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesMatrix {
    dates: BTreeSet<NaiveDate>,
    columns: Vec<(String, BTreeMap<NaiveDate, f64>)>,
}

impl SeriesMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one station column
    pub fn add_column(&mut self, station_code: impl Into<String>, subset: &Subset) {
        let values: BTreeMap<NaiveDate, f64> = subset
            .values()
            .iter()
            .map(|daily| (daily.date, daily.value))
            .collect();
        self.dates.extend(values.keys().copied());
        self.columns.push((station_code.into(), values));
    }

    /// Every date present in at least one column, ascending
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.dates.iter().copied().collect()
    }

    pub fn station_codes(&self) -> Vec<&str> {
        self.columns.iter().map(|(code, _)| code.as_str()).collect()
    }

    /// Column values aligned with [`SeriesMatrix::dates`]; `None` where absent
    pub fn column(&self, station_code: &str) -> Option<Vec<Option<f64>>> {
        self.columns
            .iter()
            .find(|(code, _)| code == station_code)
            .map(|(_, values)| self.align(values))
    }

    /// Every column in insertion order, aligned with [`SeriesMatrix::dates`]
    pub fn columns(&self) -> impl Iterator<Item = (&str, Vec<Option<f64>>)> + '_ {
        self.columns
            .iter()
            .map(|(code, values)| (code.as_str(), self.align(values)))
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Matrix restricted to the given station columns, dates recomputed
    pub fn retain_stations(&self, station_codes: &HashSet<String>) -> Self {
        let mut matrix = Self::new();
        for (code, values) in &self.columns {
            if station_codes.contains(code) {
                matrix.dates.extend(values.keys().copied());
                matrix.columns.push((code.clone(), values.clone()));
            }
        }
        matrix
    }

    fn align(&self, values: &BTreeMap<NaiveDate, f64>) -> Vec<Option<f64>> {
        self.dates.iter().map(|date| values.get(date).copied()).collect()
    }
}

/// ANNUAL row: overall figures of one station
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualRow {
    pub station: StationDescriptor,
    pub summary: OverallSummary,
}

/// MONTHLY or YEARLY row: one station over one period
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodRow {
    pub station: StationDescriptor,
    pub summary: PeriodSummary,
}

impl PeriodRow {
    pub fn period(&self) -> PeriodKey {
        self.summary.period
    }
}

/// Everything compiled from a batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledResults {
    pub matrix: SeriesMatrix,
    pub annual: Vec<AnnualRow>,
    pub monthly: Vec<PeriodRow>,
    pub yearly: Vec<PeriodRow>,
}

impl CompiledResults {
    /// MONTHLY rows of one calendar month, in station order
    pub fn monthly_for(&self, month: u32) -> Vec<&PeriodRow> {
        self.monthly
            .iter()
            .filter(|row| row.period() == PeriodKey::Month(month))
            .collect()
    }

    pub fn station_count(&self) -> usize {
        self.annual.len()
    }

    /// Results restricted to stations meeting both thresholds
    ///
    /// A station is selected when its valid-years count is at least
    /// `min_valid_years` and its overall IDV is at least `min_valid_ratio`.
    /// Every other table keeps only the rows of the selected stations.
    pub fn select_stations(
        &self,
        min_valid_years: i64,
        min_valid_ratio: f64,
    ) -> CompiledResults {
        let annual: Vec<AnnualRow> = self
            .annual
            .iter()
            .filter(|row| {
                row.summary.valid_years >= min_valid_years
                    && row.summary.completeness.valid_ratio >= min_valid_ratio
            })
            .cloned()
            .collect();

        let selected: HashSet<String> = annual.iter().map(|row| row.station.code.clone()).collect();
        let keep = |rows: &[PeriodRow]| -> Vec<PeriodRow> {
            rows.iter()
                .filter(|row| selected.contains(&row.station.code))
                .cloned()
                .collect()
        };

        CompiledResults {
            matrix: self.matrix.retain_stations(&selected),
            monthly: keep(&self.monthly),
            yearly: keep(&self.yearly),
            annual,
        }
    }
}

/// Accumulator fed by the batch orchestrator
#[derive(Debug, Default)]
pub struct ResultCompiler {
    results: CompiledResults,
}

impl ResultCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful station
    ///
    /// `valid` is the station's VALID subset, which becomes its matrix column.
    pub fn add_station(
        &mut self,
        station: &StationDescriptor,
        report: StationReport,
        valid: &Subset,
    ) {
        self.results.matrix.add_column(station.code.clone(), valid);

        self.results.annual.push(AnnualRow {
            station: station.clone(),
            summary: report.overall,
        });
        self.results
            .monthly
            .extend(report.monthly.into_iter().map(|summary| PeriodRow {
                station: station.clone(),
                summary,
            }));
        self.results
            .yearly
            .extend(report.yearly.into_iter().map(|summary| PeriodRow {
                station: station.clone(),
                summary,
            }));
    }

    pub fn finish(self) -> CompiledResults {
        self.results
    }
}
