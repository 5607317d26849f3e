//! Append-only processing ledger
//!
//! The ledger records one row per station attempt. It is truncated and
//! re-headered when a batch starts, then appended to after every station, so
//! a partially completed batch leaves a readable record of what was tried.
//!
//! # Architecture
//!
//! - [`LedgerSink`] - Storage seam used by the batch orchestrator
//! - [`CsvLedger`] - CSV file ledger, flushed after every append
//! - [`MemoryLedger`] - In-memory ledger for tests and dry runs
//! - [`LedgerTable`] - A ledger read back as a header plus text rows

pub mod csv_ledger;
pub mod memory;

#[cfg(test)]
pub mod tests;

use crate::Result;
use crate::constants::LEDGER_STATUS_COLUMN;
use crate::app::models::LedgerStatus;

pub use csv_ledger::CsvLedger;
pub use memory::MemoryLedger;

/// Storage for ledger rows
///
/// Rows are text fields aligned with the header passed to
/// [`LedgerSink::initialize`]; the sink does not interpret them.
///
/// Methods are synchronous and are called from inside the async batch loop.
/// One small append per station finishes before the next fetch starts, and
/// stations are processed one at a time, so blocking here holds up nothing
/// else.
pub trait LedgerSink {
    /// Discard previous content and write `header`
    fn initialize(&mut self, header: &[String]) -> Result<()>;

    /// Append one row; the row is durable once this returns
    fn append(&mut self, row: &[String]) -> Result<()>;

    /// Read back every row written since the last initialization
    fn read_all(&self) -> Result<LedgerTable>;
}

/// A ledger as read back from its sink
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl LedgerTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column in the header
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|column| column == name)
    }

    /// Status of every row, `None` for rows with an unknown status
    pub fn statuses(&self) -> Vec<Option<LedgerStatus>> {
        let Some(index) = self.column_index(LEDGER_STATUS_COLUMN) else {
            return vec![None; self.rows.len()];
        };

        self.rows
            .iter()
            .map(|row| row.get(index).and_then(|s| s.parse().ok()))
            .collect()
    }

    /// Rows with a given status
    pub fn with_status(&self, status: LedgerStatus) -> LedgerTable {
        let rows = self
            .rows
            .iter()
            .zip(self.statuses())
            .filter(|(_, row_status)| *row_status == Some(status))
            .map(|(row, _)| row.clone())
            .collect();

        LedgerTable::new(self.header.clone(), rows)
    }

    /// Rows of stations that produced data (the history table)
    pub fn successful(&self) -> LedgerTable {
        self.with_status(LedgerStatus::Ok)
    }
}
