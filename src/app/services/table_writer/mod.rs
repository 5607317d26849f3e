//! Output table emission
//!
//! Writes the compiled results of a batch as polars DataFrames, laid out as
//!
//! ```text
//! <output>/summary/ANNUAL, YEARLY, MONTHLY, MONTHLY_1 .. MONTHLY_12
//! <output>/series/DATA, HISTORY
//! <output>/selection/ANNUAL, YEARLY, MONTHLY, MONTHLY_1 .. MONTHLY_12
//! ```
//!
//! with the extension of the configured [`TableFormat`].

pub mod frames;

#[cfg(test)]
pub mod tests;

use crate::app::services::batch::CompiledResults;
use crate::app::services::ledger::LedgerTable;
use crate::config::TableFormat;
use crate::constants::{
    ANNUAL_TABLE, HISTORY_TABLE, MATRIX_TABLE, MONTHLY_TABLE, MONTHLY_TABLE_PREFIX,
    SELECTION_DIR_NAME, SERIES_DIR_NAME, SUMMARY_DIR_NAME, YEARLY_TABLE,
};
use crate::{Error, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use frames::{annual_frame, ledger_frame, matrix_frame, period_frame};

/// Writes compiled batch results below an output directory
#[derive(Debug, Clone)]
pub struct TableWriter {
    output_path: PathBuf,
    format: TableFormat,
}

impl TableWriter {
    pub fn new(output_path: impl Into<PathBuf>, format: TableFormat) -> Self {
        Self {
            output_path: output_path.into(),
            format,
        }
    }

    pub fn summary_dir(&self) -> PathBuf {
        self.output_path.join(SUMMARY_DIR_NAME)
    }

    pub fn series_dir(&self) -> PathBuf {
        self.output_path.join(SERIES_DIR_NAME)
    }

    pub fn selection_dir(&self) -> PathBuf {
        self.output_path.join(SELECTION_DIR_NAME)
    }

    /// Path of a named table inside `dir`
    pub fn table_path(&self, dir: &Path, table: &str) -> PathBuf {
        dir.join(format!("{}.{}", table, self.format.extension()))
    }

    /// Write every table and return the written paths
    ///
    /// # Errors
    /// * Returns `Error::Io` if an output directory cannot be created
    /// * Returns `Error::TableWriting` if a table cannot be built or written
    pub async fn write_all(
        &self,
        results: &CompiledResults,
        history: &LedgerTable,
    ) -> Result<Vec<PathBuf>> {
        let summary_dir = self.summary_dir();
        let series_dir = self.series_dir();
        for dir in [&summary_dir, &series_dir] {
            create_dir(dir).await?;
        }

        let mut written = self.write_summaries(results, &summary_dir)?;

        let mut matrix = matrix_frame(&results.matrix)?;
        written.push(self.write_frame(&mut matrix, &series_dir, MATRIX_TABLE)?);

        let mut manifest = ledger_frame(history)?;
        written.push(self.write_frame(&mut manifest, &series_dir, HISTORY_TABLE)?);

        info!(
            "Wrote {} tables to {}",
            written.len(),
            self.output_path.display()
        );
        Ok(written)
    }

    /// Write the summary tables of a station selection
    ///
    /// # Errors
    /// * Returns `Error::Io` if the selection directory cannot be created
    /// * Returns `Error::TableWriting` if a table cannot be built or written
    pub async fn write_selection(&self, selected: &CompiledResults) -> Result<Vec<PathBuf>> {
        let selection_dir = self.selection_dir();
        create_dir(&selection_dir).await?;

        let written = self.write_summaries(selected, &selection_dir)?;
        info!(
            "Wrote {} selection tables for {} stations to {}",
            written.len(),
            selected.station_count(),
            selection_dir.display()
        );
        Ok(written)
    }

    /// ANNUAL, YEARLY, MONTHLY and the twelve per-month tables
    fn write_summaries(&self, results: &CompiledResults, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        let mut annual = annual_frame(&results.annual)?;
        written.push(self.write_frame(&mut annual, dir, ANNUAL_TABLE)?);

        let mut yearly = period_frame(&results.yearly)?;
        written.push(self.write_frame(&mut yearly, dir, YEARLY_TABLE)?);

        let mut monthly = period_frame(&results.monthly)?;
        written.push(self.write_frame(&mut monthly, dir, MONTHLY_TABLE)?);

        for month in 1..=12 {
            let mut frame = period_frame(results.monthly_for(month))?;
            let name = format!("{}{}", MONTHLY_TABLE_PREFIX, month);
            written.push(self.write_frame(&mut frame, dir, &name)?);
        }

        Ok(written)
    }

    fn write_frame(&self, frame: &mut DataFrame, dir: &Path, table: &str) -> Result<PathBuf> {
        let path = self.table_path(dir, table);
        let mut file = File::create(&path)
            .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

        let written = match self.format {
            TableFormat::Csv => CsvWriter::new(&mut file).include_header(true).finish(frame),
            TableFormat::Parquet => ParquetWriter::new(&mut file).finish(frame).map(|_| ()),
        };
        written.map_err(|e| Error::table_writing(format!("Failed to write {}", path.display()), e))?;

        debug!(
            "Wrote {} ({} rows x {} columns)",
            path.display(),
            frame.height(),
            frame.width()
        );
        Ok(path)
    }
}

async fn create_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| Error::io(format!("Failed to create output directory {}", dir.display()), e))
}
