//! In-memory ledger

use super::{LedgerSink, LedgerTable};
use crate::{Error, Result};

/// Ledger kept in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    table: Option<LedgerTable>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerSink for MemoryLedger {
    fn initialize(&mut self, header: &[String]) -> Result<()> {
        self.table = Some(LedgerTable::new(header.to_vec(), Vec::new()));
        Ok(())
    }

    fn append(&mut self, row: &[String]) -> Result<()> {
        let table = self
            .table
            .as_mut()
            .ok_or_else(|| Error::ledger("Ledger must be initialized before appending"))?;
        table.rows.push(row.to_vec());
        Ok(())
    }

    fn read_all(&self) -> Result<LedgerTable> {
        self.table
            .clone()
            .ok_or_else(|| Error::ledger("Ledger has not been initialized"))
    }
}
