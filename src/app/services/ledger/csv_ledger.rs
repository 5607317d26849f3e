//! CSV file ledger

use super::{LedgerSink, LedgerTable};
use crate::{Error, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Ledger stored as a CSV file
///
/// Each append opens the file in append mode and flushes before returning,
/// so every completed station survives an interrupted batch.
#[derive(Debug, Clone)]
pub struct CsvLedger {
    path: PathBuf,
}

impl CsvLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_record(&self, file: File, fields: &[String]) -> Result<()> {
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(fields).map_err(|e| {
            Error::csv_parsing(
                self.path.display().to_string(),
                "Failed to write ledger row",
                Some(e),
            )
        })?;
        writer
            .flush()
            .map_err(|e| Error::io(format!("Failed to flush ledger {}", self.path.display()), e))
    }
}

impl LedgerSink for CsvLedger {
    fn initialize(&mut self, header: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::io(
                    format!("Failed to create ledger directory {}", parent.display()),
                    e,
                )
            })?;
        }

        let file = File::create(&self.path).map_err(|e| {
            Error::io(format!("Failed to create ledger {}", self.path.display()), e)
        })?;
        self.write_record(file, header)?;

        debug!("Initialized ledger at {}", self.path.display());
        Ok(())
    }

    fn append(&mut self, row: &[String]) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                Error::ledger(format!(
                    "Ledger {} is not initialized or not writable: {}",
                    self.path.display(),
                    e
                ))
            })?;
        self.write_record(file, row)
    }

    fn read_all(&self) -> Result<LedgerTable> {
        let file = File::open(&self.path)
            .map_err(|e| Error::io(format!("Failed to open ledger {}", self.path.display()), e))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let file_name = self.path.display().to_string();
        let header = reader
            .headers()
            .map_err(|e| Error::csv_parsing(&file_name, "Failed to read ledger header", Some(e)))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record
                .map_err(|e| Error::csv_parsing(&file_name, "Failed to read ledger row", Some(e)))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(LedgerTable::new(header, rows))
    }
}
