//! Series classification for raw station series
//!
//! This module turns a raw [`ObservationSeries`] into the four subsets every
//! downstream computation works on.
//!
//! # Architecture
//!
//! - [`coercion`] - Numeric coercion of raw cells (non-numeric becomes missing)
//! - [`deduplication`] - Date deduplication, first occurrence wins
//!
//! # Classification Pipeline
//!
//! 1. **Coercion**: every raw cell is parsed as a number; anything else is missing
//! 2. **ALL**: missing values are dropped
//! 3. **Deduplication**: later readings for an already seen day are discarded
//! 4. **Filters**: VALID, ABOVE_THRESHOLD and NONZERO are independent filters over ALL
//!
//! # Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use hidro_processor::app::models::{ObservationSeries, RawObservation};
//! use hidro_processor::app::services::series_classifier::SeriesClassifier;
//!
//! let day = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
//! let series = ObservationSeries::new("83088", vec![
//!     RawObservation::new(day, "12.4"),
//!     RawObservation::new(day.succ_opt().unwrap(), "-1"),
//! ]);
//!
//! let classified = SeriesClassifier::new(1.0).classify(&series);
//! assert_eq!(classified.all.len(), 2);
//! assert_eq!(classified.valid.len(), 1);
//! ```

pub mod coercion;
pub mod deduplication;

#[cfg(test)]
pub mod tests;

use crate::app::models::{ObservationSeries, Subset, SubsetKind};
use crate::constants::{NONZERO_THRESHOLD, VALID_LOWER_BOUND};
use tracing::debug;

pub use coercion::coerce_value;
pub use deduplication::deduplicate_first;

/// Counters collected while classifying one series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationStats {
    /// Raw rows received
    pub raw_rows: usize,
    /// Rows whose cell could not be read as a number
    pub unparsable: usize,
    /// Rows discarded because their day was already seen
    pub duplicates_removed: usize,
}

/// The four subsets of one station series
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedSeries {
    pub station_code: String,
    pub all: Subset,
    pub valid: Subset,
    pub above_threshold: Subset,
    pub nonzero: Subset,
    pub stats: ClassificationStats,
}

impl ClassifiedSeries {
    /// Access a subset by kind
    pub fn subset(&self, kind: SubsetKind) -> &Subset {
        match kind {
            SubsetKind::All => &self.all,
            SubsetKind::Valid => &self.valid,
            SubsetKind::AboveThreshold => &self.above_threshold,
            SubsetKind::Nonzero => &self.nonzero,
        }
    }
}

/// Classifier holding the deployment's rain-day threshold
#[derive(Debug, Clone, Copy)]
pub struct SeriesClassifier {
    rain_threshold: f64,
}

impl SeriesClassifier {
    /// Create a classifier with the given ABOVE_THRESHOLD lower bound
    pub fn new(rain_threshold: f64) -> Self {
        Self { rain_threshold }
    }

    /// Classify a raw series into its subsets
    pub fn classify(&self, series: &ObservationSeries) -> ClassifiedSeries {
        let mut stats = ClassificationStats {
            raw_rows: series.len(),
            ..Default::default()
        };

        let numeric: Vec<_> = series
            .observations
            .iter()
            .filter_map(|obs| {
                let value = obs.raw_value.as_deref().and_then(coerce_value);
                if value.is_none() && obs.raw_value.as_deref().is_some_and(|s| !s.trim().is_empty())
                {
                    stats.unparsable += 1;
                }
                value.map(|v| (obs.date, v))
            })
            .collect();

        let (values, duplicates_removed) = deduplicate_first(numeric);
        stats.duplicates_removed = duplicates_removed;

        let all = Subset::new(SubsetKind::All, values);
        let threshold = self.rain_threshold;
        let valid = all.filter(SubsetKind::Valid, |v| v >= VALID_LOWER_BOUND);
        let above_threshold = all.filter(SubsetKind::AboveThreshold, |v| v >= threshold);
        let nonzero = all.filter(SubsetKind::Nonzero, |v| v >= NONZERO_THRESHOLD);

        debug!(
            "Classified station {}: {} raw rows, {} unparsable, {} duplicates -> ALL {}, VALID {}, ABOVE_THRESHOLD {}, NONZERO {}",
            series.station_code,
            stats.raw_rows,
            stats.unparsable,
            stats.duplicates_removed,
            all.len(),
            valid.len(),
            above_threshold.len(),
            nonzero.len()
        );

        ClassifiedSeries {
            station_code: series.station_code.clone(),
            all,
            valid,
            above_threshold,
            nonzero,
            stats,
        }
    }
}
