//! Inventory loading statistics

use std::time::Duration;

/// Counters collected while loading the inventory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryLoadStats {
    /// Data rows in the file
    pub rows_read: usize,
    /// Stations kept
    pub stations_loaded: usize,
    /// Rows that failed to deserialize or validate
    pub rows_skipped: usize,
    /// Rows dropped because their code was already loaded
    pub duplicates: usize,
    pub load_duration: Duration,
}

impl InventoryLoadStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_rejections(&self) -> bool {
        self.rows_skipped > 0 || self.duplicates > 0
    }

    pub fn summary(&self) -> String {
        format!(
            "Loaded {} stations from {} inventory rows ({} skipped, {} duplicates) in {:.2}s",
            self.stations_loaded,
            self.rows_read,
            self.rows_skipped,
            self.duplicates,
            self.load_duration.as_secs_f64()
        )
    }
}
