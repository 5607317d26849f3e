//! Command implementations for the Hidro processor CLI
//!
//! Each command is implemented in its own module:
//! - `process`: batch over the inventory with table and ledger output
//! - `stations`: inventory listing
//! - `ledger`: summary of an existing processing ledger

pub mod ledger;
pub mod process;
pub mod shared;
pub mod stations;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Dispatch to the selected subcommand
pub async fn run(args: Args) -> Result<()> {
    shared::setup_logging(args.get_log_level(), args.is_quiet());

    match args.command {
        Some(Commands::Process(process_args)) => process::run_process(process_args).await,
        Some(Commands::Stations(stations_args)) => stations::run_stations(stations_args).await,
        Some(Commands::Ledger(ledger_args)) => ledger::run_ledger(ledger_args).await,
        None => Err(Error::configuration("No command given")),
    }
}
