//! Gateway over a locally mirrored series cache

use super::layout::CacheLayout;
use super::{FetchOutcome, SeriesRequest, SourceGateway, TransportError};
use crate::app::models::ObservationSeries;
use crate::constants::SERIES_FILE_EXTENSION;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads series from `<root>/type-<data type>/level-<consistency>/<code>.csv`
#[derive(Debug, Clone)]
pub struct CsvCacheGateway {
    root: PathBuf,
}

impl CsvCacheGateway {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the cached file for a request
    pub fn series_path(&self, request: &SeriesRequest) -> PathBuf {
        self.root
            .join(format!("type-{}", request.data_type.code()))
            .join(format!("level-{}", request.consistency.code()))
            .join(format!("{}.{}", request.station_code, SERIES_FILE_EXTENSION))
    }
}

impl SourceGateway for CsvCacheGateway {
    async fn fetch(&self, request: &SeriesRequest) -> Result<FetchOutcome, TransportError> {
        let path = self.series_path(request);

        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| TransportError::CacheRead(path.clone(), e))?;
        if !exists {
            debug!(
                "No cached series for station {} at {}",
                request.station_code,
                path.display()
            );
            return Ok(FetchOutcome::Empty);
        }

        let request = request.clone();
        let outcome = tokio::task::spawn_blocking(move || read_series(&path, &request)).await??;
        Ok(outcome)
    }
}

/// Read and window a cached series file
fn read_series(path: &Path, request: &SeriesRequest) -> Result<FetchOutcome, TransportError> {
    let file = File::open(path).map_err(|e| TransportError::CacheRead(path.to_path_buf(), e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let header = reader
        .headers()
        .map_err(|e| TransportError::CacheParse(path.to_path_buf(), e))?
        .clone();
    let layout = CacheLayout::detect(&header).ok_or_else(|| TransportError::UnrecognizedLayout {
        path: path.to_path_buf(),
        header: header.iter().collect::<Vec<_>>().join(","),
    })?;

    let mut observations = Vec::new();
    let mut rows = 0usize;
    for record in reader.records() {
        let record = record.map_err(|e| TransportError::CacheParse(path.to_path_buf(), e))?;
        rows += 1;
        observations.extend(
            layout
                .observations(&record)
                .into_iter()
                .filter(|observation| request.contains(observation.date)),
        );
    }

    debug!(
        "Read {} rows ({} observations in window) for station {} from {}",
        rows,
        observations.len(),
        request.station_code,
        path.display()
    );

    if observations.is_empty() {
        return Ok(FetchOutcome::Empty);
    }

    observations.sort_by_key(|observation| observation.date);
    Ok(FetchOutcome::Series(ObservationSeries::new(
        request.station_code.clone(),
        observations,
    )))
}
