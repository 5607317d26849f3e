//! Batch processing statistics

use std::time::Duration;

/// Counters for one batch run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStats {
    /// Stations attempted
    pub attempted: usize,
    /// Stations that ended OK
    pub ok: usize,
    /// Stations that ended NO DATA, for any reason
    pub no_data: usize,
    /// NO DATA because the source held nothing
    pub empty_series: usize,
    /// NO DATA because fewer than two numeric observations remained
    pub insufficient_records: usize,
    /// NO DATA because the fetch failed
    pub transport_failures: usize,
    /// Whether the empty-batch trailer was written
    pub empty_batch_trailer: bool,
    pub processing_time: Duration,
}

impl BatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of attempted stations that ended OK, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            (self.ok as f64 / self.attempted as f64) * 100.0
        }
    }

    pub fn stations_per_second(&self) -> f64 {
        if self.processing_time.is_zero() {
            0.0
        } else {
            self.attempted as f64 / self.processing_time.as_secs_f64()
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Processed {} stations: {} OK, {} no data ({} empty, {} insufficient, {} failed fetches) in {:.2}s",
            self.attempted,
            self.ok,
            self.no_data,
            self.empty_series,
            self.insufficient_records,
            self.transport_failures,
            self.processing_time.as_secs_f64()
        )
    }
}
