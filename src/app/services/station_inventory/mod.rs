//! Station inventory loading
//!
//! The inventory is a CSV export with one row per station. Rows that fail to
//! deserialize or validate are skipped with a warning; a repeated station code
//! keeps the first row seen.

pub mod stats;

#[cfg(test)]
pub mod tests;

use crate::app::models::StationDescriptor;
use crate::{Error, Result};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

pub use stats::InventoryLoadStats;

/// Ordered station descriptors for one batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationInventory {
    stations: Vec<StationDescriptor>,
}

impl StationInventory {
    pub fn new(stations: Vec<StationDescriptor>) -> Self {
        Self { stations }
    }

    /// Load the inventory from a CSV file
    ///
    /// # Errors
    /// * Returns `Error::Inventory` if the file cannot be read or has no usable header
    pub async fn load(path: &Path) -> Result<(Self, InventoryLoadStats)> {
        info!("Loading station inventory from {}", path.display());
        let start_time = Instant::now();

        let content = tokio::fs::read(path).await.map_err(|e| {
            Error::inventory(format!(
                "Cannot read station inventory {}: {}",
                path.display(),
                e
            ))
        })?;

        let (inventory, mut stats) = Self::from_reader(content.as_slice())?;
        stats.load_duration = start_time.elapsed();

        info!("{}", stats.summary());
        Ok((inventory, stats))
    }

    /// Parse an inventory from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<(Self, InventoryLoadStats)> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        csv_reader
            .headers()
            .map_err(|e| Error::inventory(format!("Invalid inventory header: {}", e)))?;

        let mut stats = InventoryLoadStats::new();
        let mut seen = HashSet::new();
        let mut stations = Vec::new();

        for (index, result) in csv_reader.deserialize::<StationDescriptor>().enumerate() {
            stats.rows_read += 1;
            // Header is line 1
            let line = index + 2;

            let station = match result.map_err(Error::from).and_then(|s| s.validate().map(|_| s)) {
                Ok(station) => station,
                Err(e) => {
                    warn!("Skipping inventory row at line {}: {}", line, e);
                    stats.rows_skipped += 1;
                    continue;
                }
            };

            if !seen.insert(station.code.clone()) {
                warn!(
                    "Duplicate station code {} at line {}, keeping first row",
                    station.code, line
                );
                stats.duplicates += 1;
                continue;
            }

            debug!("Loaded station {} ({})", station.code, station.name);
            stations.push(station);
        }

        stats.stations_loaded = stations.len();
        Ok((Self::new(stations), stats))
    }

    pub fn stations(&self) -> &[StationDescriptor] {
        &self.stations
    }

    pub fn get(&self, code: &str) -> Option<&StationDescriptor> {
        self.stations.iter().find(|station| station.code == code)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Stations whose state matches `state`, case-insensitively
    pub fn filter_by_state(&self, state: &str) -> Vec<&StationDescriptor> {
        self.stations
            .iter()
            .filter(|station| station.state.eq_ignore_ascii_case(state))
            .collect()
    }
}
