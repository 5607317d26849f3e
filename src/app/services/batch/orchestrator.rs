//! Batch orchestrator
//!
//! Walks the station list in order. Each station moves through
//! `FETCHING -> CLASSIFIED -> STATS_COMPUTED -> LOGGED` and ends either OK or
//! NO DATA; per-station failures never abort the batch. The orchestrator is
//! the only writer of the ledger and of the result compiler.

use super::compiler::{CompiledResults, ResultCompiler};
use super::stats::BatchStats;
use crate::app::models::{LedgerEntry, StationDescriptor};
use crate::app::services::date_range::DateSpan;
use crate::app::services::ledger::{LedgerSink, LedgerTable};
use crate::app::services::series_classifier::{ClassifiedSeries, SeriesClassifier};
use crate::app::services::source_gateway::{
    FetchOutcome, SeriesRequest, SourceGateway, TransportError,
};
use crate::app::services::statistics::{StationAnalyzer, StationReport};
use crate::config::ProcessingConfig;
use crate::constants::MIN_OBSERVATIONS;
use crate::Result;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Why a station ended without data
#[derive(Debug)]
pub enum NoDataReason {
    Empty,
    InsufficientRecords { numeric: usize },
    Transport(TransportError),
}

/// Terminal outcome of one station attempt
#[derive(Debug)]
pub enum StationOutcome {
    Ok {
        entry: LedgerEntry,
        report: StationReport,
        classified: ClassifiedSeries,
    },
    NoData {
        entry: LedgerEntry,
        reason: NoDataReason,
    },
}

impl StationOutcome {
    pub fn entry(&self) -> &LedgerEntry {
        match self {
            StationOutcome::Ok { entry, .. } | StationOutcome::NoData { entry, .. } => entry,
        }
    }
}

/// Everything produced by a batch run
#[derive(Debug)]
pub struct BatchOutcome {
    pub results: CompiledResults,
    pub stats: BatchStats,
    /// Ledger rows of stations that ended OK
    pub history: LedgerTable,
}

/// Sequential batch processor over a gateway and a ledger
pub struct BatchProcessor<G, L> {
    gateway: G,
    ledger: L,
    config: ProcessingConfig,
    classifier: SeriesClassifier,
    analyzer: StationAnalyzer,
}

impl<G: SourceGateway, L: LedgerSink> BatchProcessor<G, L> {
    pub fn new(gateway: G, ledger: L, config: ProcessingConfig) -> Self {
        Self {
            classifier: SeriesClassifier::new(config.rain_threshold),
            analyzer: StationAnalyzer::from_config(&config),
            gateway,
            ledger,
            config,
        }
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn into_ledger(self) -> L {
        self.ledger
    }

    /// Process every station in order
    ///
    /// # Errors
    /// * Returns `Error::Configuration` for an invalid configuration
    /// * Returns ledger errors; station-level failures are recorded, not returned
    pub async fn run(&mut self, stations: &[StationDescriptor]) -> Result<BatchOutcome> {
        self.config.validate()?;

        info!("Starting batch over {} stations", stations.len());
        let start_time = Instant::now();

        self.ledger.initialize(&LedgerEntry::header())?;

        let progress_bar = self.create_progress_bar(stations.len());
        let mut compiler = ResultCompiler::new();
        let mut stats = BatchStats::new();
        let total = stations.len();

        for (index, station) in stations.iter().enumerate() {
            let ordinal = index + 1;
            let outcome = self.process_station(station).await;

            self.ledger.append(&outcome.entry().to_row())?;
            debug!("Station {} LOGGED as {}", station.code, outcome.entry().status);

            let line = progress_line(station, ordinal, total, &outcome);
            match &progress_bar {
                Some(pb) => {
                    pb.println(line);
                    pb.inc(1);
                }
                None => debug!("{}", line),
            }

            stats.attempted += 1;
            match outcome {
                StationOutcome::Ok {
                    report, classified, ..
                } => {
                    stats.ok += 1;
                    compiler.add_station(station, report, &classified.valid);
                }
                StationOutcome::NoData { reason, .. } => {
                    stats.no_data += 1;
                    match reason {
                        NoDataReason::Empty => stats.empty_series += 1,
                        NoDataReason::InsufficientRecords { .. } => {
                            stats.insufficient_records += 1
                        }
                        NoDataReason::Transport(_) => stats.transport_failures += 1,
                    }
                }
            }
        }

        if let Some(pb) = &progress_bar {
            pb.finish_with_message(format!("Processed {} stations", total));
        }

        if stats.ok == 0 {
            if let Some(last) = stations.last() {
                self.ledger.append(&LedgerEntry::empty_batch(last).to_row())?;
                stats.empty_batch_trailer = true;
                warn!("No station in the batch produced data");
                if self.config.show_progress {
                    println!("{}", "No station in the batch produced data".red().bold());
                }
            }
        }

        stats.processing_time = start_time.elapsed();
        info!("{}", stats.summary());

        let history = self.ledger.read_all()?.successful();

        Ok(BatchOutcome {
            results: compiler.finish(),
            stats,
            history,
        })
    }

    /// Run one station up to, but not including, the ledger append
    pub async fn process_station(&self, station: &StationDescriptor) -> StationOutcome {
        debug!("Station {} FETCHING", station.code);
        let request = SeriesRequest::from_config(station.code.clone(), &self.config);

        let series = match self.gateway.fetch(&request).await {
            Ok(FetchOutcome::Series(series)) if !series.is_empty() => series,
            Ok(_) => {
                debug!("Station {} returned no series", station.code);
                return no_data(station, NoDataReason::Empty);
            }
            Err(e) => {
                warn!("Fetch failed for station {}: {}", station.code, e);
                return no_data(station, NoDataReason::Transport(e));
            }
        };

        let record_count = series.len();
        let classified = self.classifier.classify(&series);
        debug!(
            "Station {} CLASSIFIED: {} numeric, {} valid",
            station.code,
            classified.all.len(),
            classified.valid.len()
        );

        let span = DateSpan::between(classified.all.first_date(), classified.all.last_date());
        let span = match span {
            Some(span) if classified.all.len() >= MIN_OBSERVATIONS => span,
            _ => {
                let numeric = classified.all.len();
                debug!("Station {} has {} numeric observations", station.code, numeric);
                return no_data(station, NoDataReason::InsufficientRecords { numeric });
            }
        };

        let report = self.analyzer.analyze(&classified, span, record_count);
        debug!("Station {} STATS_COMPUTED", station.code);

        StationOutcome::Ok {
            entry: LedgerEntry::ok(station, record_count, span.date_min, span.date_max),
            report,
            classified,
        }
    }

    fn create_progress_bar(&self, total: usize) -> Option<ProgressBar> {
        if !self.config.show_progress {
            return None;
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message("Processing stations...");
        Some(pb)
    }
}

fn no_data(station: &StationDescriptor, reason: NoDataReason) -> StationOutcome {
    StationOutcome::NoData {
        entry: LedgerEntry::no_data(station),
        reason,
    }
}

/// One user-facing line per station
fn progress_line(
    station: &StationDescriptor,
    ordinal: usize,
    total: usize,
    outcome: &StationOutcome,
) -> String {
    let head = format!(
        "{} - {} of {} - {} - {}",
        station.code.bold(),
        ordinal,
        total,
        station.name,
        station.state
    );

    match outcome {
        StationOutcome::Ok { entry, .. } => format!(
            "{} - {} - {} - {}",
            head,
            entry.date_min.map(|d| d.to_string()).unwrap_or_default(),
            entry.date_max.map(|d| d.to_string()).unwrap_or_default(),
            format!("{} records", entry.record_count).green()
        ),
        StationOutcome::NoData { .. } => format!("{} - {}", head, "no data".yellow()),
    }
}
