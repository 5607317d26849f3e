//! Ledger command: summarize an existing processing ledger

use super::shared::tally;
use crate::app::services::ledger::{CsvLedger, LedgerSink};
use crate::cli::args::LedgerArgs;
use crate::constants::LEDGER_STATUS_COLUMN;
use crate::{Error, Result};
use colored::*;
use tracing::debug;

pub async fn run_ledger(args: LedgerArgs) -> Result<()> {
    debug!("Ledger arguments: {:?}", args);

    let ledger = CsvLedger::new(args.ledger_path.clone());
    let table = ledger.read_all()?;
    let status_index = table.column_index(LEDGER_STATUS_COLUMN).ok_or_else(|| {
        Error::ledger(format!(
            "Ledger {} has no '{}' column",
            args.ledger_path.display(),
            LEDGER_STATUS_COLUMN
        ))
    })?;

    println!("{} {}", "Ledger".bold(), args.ledger_path.display());
    println!("   • Rows: {}", table.len());
    let statuses = table
        .rows
        .iter()
        .map(|row| row.get(status_index).map(String::as_str).unwrap_or(""));
    for (status, count) in tally(statuses) {
        println!("   • {}: {}", status, count);
    }

    if args.successful {
        println!();
        for row in &table.successful().rows {
            println!("{}", row.join(" - "));
        }
    }
    Ok(())
}
