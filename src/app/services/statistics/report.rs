//! Per-station statistics report at every resolution
//!
//! Runs the statistics calculator and the completeness engine once per
//! subset, resolution and period key for a classified series.

use super::completeness::{
    CompletenessEngine, CompletenessIndex, valid_days_estimate, valid_years_count,
};
use super::descriptive::StatisticsSet;
use crate::app::models::PeriodKey;
use crate::app::services::date_range::DateSpan;
use crate::app::services::series_classifier::ClassifiedSeries;
use crate::config::{ProcessingConfig, YearRatioMode};
use tracing::debug;

/// Overall (whole-span) figures for one station
#[derive(Debug, Clone, PartialEq)]
pub struct OverallSummary {
    pub span: DateSpan,
    /// Raw rows returned by the source
    pub record_count: usize,
    /// Numeric rows after deduplication (|ALL|)
    pub numeric_count: usize,
    /// `ceil(total_years * IDV / 100)`
    pub valid_years: i64,
    pub completeness: CompletenessIndex,
    pub statistics: StatisticsSet,
}

/// Figures for one month (pooled across years) or one year
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub period: PeriodKey,
    /// `ceil(period_days * IDV / 100)`
    pub valid_days_estimate: i64,
    pub completeness: CompletenessIndex,
    pub statistics: StatisticsSet,
}

/// Complete statistics report for one station
#[derive(Debug, Clone, PartialEq)]
pub struct StationReport {
    pub station_code: String,
    pub overall: OverallSummary,
    /// Months 1..=12, in order
    pub monthly: Vec<PeriodSummary>,
    /// Years of the VALID range, in order
    pub yearly: Vec<PeriodSummary>,
}

/// Builds [`StationReport`]s for classified series
#[derive(Debug, Clone, Copy)]
pub struct StationAnalyzer {
    engine: CompletenessEngine,
    include_empty_periods: bool,
}

impl StationAnalyzer {
    pub fn new(year_ratio_mode: YearRatioMode, include_empty_periods: bool) -> Self {
        Self {
            engine: CompletenessEngine::new(year_ratio_mode),
            include_empty_periods,
        }
    }

    pub fn from_config(config: &ProcessingConfig) -> Self {
        Self::new(config.year_ratio_mode, config.include_empty_periods)
    }

    /// Compute every block for a station
    ///
    /// # Arguments
    ///
    /// * `classified` - Subsets of the station series
    /// * `span` - Observed date span of the series
    /// * `record_count` - Raw rows returned by the source
    pub fn analyze(
        &self,
        classified: &ClassifiedSeries,
        span: DateSpan,
        record_count: usize,
    ) -> StationReport {
        let overall = self.overall(classified, span, record_count);
        let monthly = self.monthly(classified, span);
        let yearly = self.yearly(classified);

        debug!(
            "Station {} report: IDV {:.2}%, {} valid years, {} monthly rows, {} yearly rows",
            classified.station_code,
            overall.completeness.valid_ratio,
            overall.valid_years,
            monthly.len(),
            yearly.len()
        );

        StationReport {
            station_code: classified.station_code.clone(),
            overall,
            monthly,
            yearly,
        }
    }

    fn overall(
        &self,
        classified: &ClassifiedSeries,
        span: DateSpan,
        record_count: usize,
    ) -> OverallSummary {
        let completeness = self.engine.overall(classified, Some(span.total_days));

        OverallSummary {
            span,
            record_count,
            numeric_count: classified.all.len(),
            valid_years: valid_years_count(Some(span.total_years), completeness.valid_ratio),
            completeness,
            statistics: StatisticsSet::for_period(classified, PeriodKey::Overall),
        }
    }

    fn monthly(&self, classified: &ClassifiedSeries, span: DateSpan) -> Vec<PeriodSummary> {
        use chrono::Datelike;

        let (first_year, last_year) = (span.date_min.year(), span.date_max.year());

        (1..=12)
            .map(|month| {
                let completeness = self.engine.month(classified, month, first_year, last_year);
                self.period_summary(classified, PeriodKey::Month(month), completeness)
            })
            .filter(|summary| self.keep(summary))
            .collect()
    }

    fn yearly(&self, classified: &ClassifiedSeries) -> Vec<PeriodSummary> {
        let Some((first_year, last_year)) = classified.valid.year_range() else {
            return Vec::new();
        };

        (first_year..=last_year)
            .map(|year| {
                let completeness = self.engine.year(classified, year);
                self.period_summary(classified, PeriodKey::Year(year), completeness)
            })
            .filter(|summary| self.keep(summary))
            .collect()
    }

    fn period_summary(
        &self,
        classified: &ClassifiedSeries,
        period: PeriodKey,
        completeness: CompletenessIndex,
    ) -> PeriodSummary {
        PeriodSummary {
            period,
            valid_days_estimate: valid_days_estimate(
                completeness.period_days,
                completeness.valid_ratio,
            ),
            completeness,
            statistics: StatisticsSet::for_period(classified, period),
        }
    }

    fn keep(&self, summary: &PeriodSummary) -> bool {
        self.include_empty_periods || summary.completeness.valid_count > 0
    }
}
