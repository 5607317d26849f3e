//! Source gateway: where station series come from
//!
//! The batch orchestrator only sees the [`SourceGateway`] trait. A fetch
//! either returns a series, reports that the source holds nothing for the
//! request ([`FetchOutcome::Empty`], which is not an error), or fails with a
//! [`TransportError`] that the orchestrator absorbs per station.
//!
//! # Architecture
//!
//! - [`csv_cache`] - Gateway over a locally mirrored series cache
//! - [`layout`] - Detection and parsing of the accepted cache file layouts

pub mod csv_cache;
pub mod layout;

#[cfg(test)]
pub mod tests;

use crate::app::models::ObservationSeries;
use crate::config::{ConsistencyLevel, DataType, ProcessingConfig};
use chrono::NaiveDate;
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;

pub use csv_cache::CsvCacheGateway;
pub use layout::CacheLayout;

/// Parameters of a single series fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    pub station_code: String,
    pub data_type: DataType,
    /// Inclusive lower bound on observation dates
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on observation dates
    pub end_date: Option<NaiveDate>,
    pub consistency: ConsistencyLevel,
}

impl SeriesRequest {
    pub fn new(
        station_code: impl Into<String>,
        data_type: DataType,
        consistency: ConsistencyLevel,
    ) -> Self {
        Self {
            station_code: station_code.into(),
            data_type,
            start_date: None,
            end_date: None,
            consistency,
        }
    }

    /// Request for one station with the window and codes of a configuration
    pub fn from_config(station_code: impl Into<String>, config: &ProcessingConfig) -> Self {
        Self {
            station_code: station_code.into(),
            data_type: config.data_type,
            start_date: config.start_date,
            end_date: config.end_date,
            consistency: config.consistency,
        }
    }

    pub fn with_window(
        mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    /// Whether a date lies inside the requested window
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date.is_none_or(|start| date >= start)
            && self.end_date.is_none_or(|end| date <= end)
    }
}

/// Result of a successful fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Series(ObservationSeries),
    /// The source holds no series for the request
    Empty,
}

impl FetchOutcome {
    /// Series with at least one observation, `None` otherwise
    pub fn into_series(self) -> Option<ObservationSeries> {
        match self {
            FetchOutcome::Series(series) if !series.is_empty() => Some(series),
            _ => None,
        }
    }
}

/// Failure to obtain a series from the source
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to read cached series '{0}'")]
    CacheRead(PathBuf, #[source] std::io::Error),

    #[error("Malformed cached series '{0}'")]
    CacheParse(PathBuf, #[source] csv::Error),

    #[error("Unrecognised layout in cached series '{path}': header [{header}]")]
    UnrecognizedLayout { path: PathBuf, header: String },

    #[error("Source unavailable for station '{station}': {message}")]
    Unavailable { station: String, message: String },

    #[error("Background fetch task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Backend that delivers daily series for stations
pub trait SourceGateway {
    /// Fetch the series described by `request`
    fn fetch(
        &self,
        request: &SeriesRequest,
    ) -> impl Future<Output = Result<FetchOutcome, TransportError>> + Send;
}
