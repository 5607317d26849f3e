//! Command-line argument definitions for the Hidro processor
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::config::{
    ConsistencyLevel, DataType, ProcessingConfig, StationSelection, TableFormat, YearRatioMode,
};
use crate::constants::{DEFAULT_MIN_VALID_RATIO, DEFAULT_MIN_VALID_YEARS, DEFAULT_RAIN_THRESHOLD};
use crate::{Error, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the rain-station series processor
///
/// Fetches the daily series of every station in an inventory, computes
/// completeness indices and descriptive statistics, and writes combined
/// tables plus a processing ledger.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hidro-processor",
    version,
    about = "Completeness indices and statistics for rain-gauge station series",
    long_about = "Processes a station inventory against a local series cache. For every station \
                  the daily series is classified into ALL, VALID, ABOVE_THRESHOLD and NONZERO \
                  subsets, statistics and completeness indices are computed at overall, monthly \
                  and yearly resolution, and each attempt is recorded in an append-only ledger."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run a batch over the station inventory (main command)
    Process(ProcessArgs),
    /// List the stations of an inventory
    Stations(StationsArgs),
    /// Summarize an existing processing ledger
    Ledger(LedgerArgs),
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Station inventory CSV
    #[arg(
        short = 'i',
        long = "inventory",
        value_name = "FILE",
        help = "Station inventory CSV"
    )]
    pub inventory_path: PathBuf,

    /// Root of the local series cache
    ///
    /// Series are read from <PATH>/type-<data type>/level-<consistency>/<code>.csv.
    /// Defaults to the user data directory.
    #[arg(
        long = "cache-path",
        value_name = "PATH",
        help = "Root of the local series cache"
    )]
    pub cache_path: Option<PathBuf>,

    /// Output directory for the summary and series tables
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output directory for generated tables"
    )]
    pub output_path: Option<PathBuf>,

    /// Ledger file; defaults to history.csv inside the output directory
    #[arg(long = "ledger", value_name = "FILE", help = "Processing ledger file")]
    pub ledger_path: Option<PathBuf>,

    /// First day requested from the source (YYYY-MM-DD)
    #[arg(long = "start", value_name = "DATE", help = "First day to fetch (inclusive)")]
    pub start_date: Option<NaiveDate>,

    /// Last day requested from the source (YYYY-MM-DD)
    #[arg(long = "end", value_name = "DATE", help = "Last day to fetch (inclusive)")]
    pub end_date: Option<NaiveDate>,

    #[arg(
        long = "data-type",
        value_enum,
        default_value = "rainfall",
        help = "Measurement type requested from the source"
    )]
    pub data_type: DataType,

    #[arg(
        long = "consistency",
        value_enum,
        default_value = "raw",
        help = "Consistency level requested from the source"
    )]
    pub consistency: ConsistencyLevel,

    /// Lower bound (mm) of the ABOVE_THRESHOLD subset
    #[arg(
        short = 't',
        long = "threshold",
        value_name = "MM",
        default_value_t = DEFAULT_RAIN_THRESHOLD,
        help = "Rain-day threshold in mm"
    )]
    pub rain_threshold: f64,

    /// Formula for the yearly NONZERO and ABOVE_THRESHOLD ratios
    ///
    /// `historical` reproduces published tables, where every yearly ratio
    /// used the VALID count; `corrected` uses each subset's own count.
    #[arg(
        long = "year-ratio",
        value_enum,
        default_value = "historical",
        help = "Yearly ratio formula"
    )]
    pub year_ratio_mode: YearRatioMode,

    /// Omit months and years without any VALID observation
    #[arg(long = "skip-empty-periods", help = "Omit periods without VALID observations")]
    pub skip_empty_periods: bool,

    /// Also write the summaries of stations meeting the selection thresholds
    #[arg(long = "select", help = "Write summaries of the selected stations")]
    pub select: bool,

    #[arg(
        long = "min-valid-years",
        value_name = "YEARS",
        default_value_t = DEFAULT_MIN_VALID_YEARS,
        requires = "select",
        help = "Minimum valid years of a selected station"
    )]
    pub min_valid_years: i64,

    #[arg(
        long = "min-idv",
        value_name = "PERCENT",
        default_value_t = DEFAULT_MIN_VALID_RATIO,
        requires = "select",
        help = "Minimum overall IDV of a selected station"
    )]
    pub min_valid_ratio: f64,

    #[arg(
        long = "format",
        value_enum,
        default_value = "csv",
        help = "File format of the output tables"
    )]
    pub table_format: TableFormat,

    /// Load the inventory and show what would be processed
    #[arg(long = "dry-run", help = "Show what would be processed without fetching")]
    pub dry_run: bool,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the stations command
#[derive(Debug, Clone, Parser)]
pub struct StationsArgs {
    #[arg(
        short = 'i',
        long = "inventory",
        value_name = "FILE",
        help = "Station inventory CSV"
    )]
    pub inventory_path: PathBuf,

    /// Only list stations of this state
    #[arg(long = "state", value_name = "NAME", help = "Filter stations by state")]
    pub state: Option<String>,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Arguments for the ledger command
#[derive(Debug, Clone, Parser)]
pub struct LedgerArgs {
    #[arg(short = 'l', long = "ledger", value_name = "FILE", help = "Processing ledger file")]
    pub ledger_path: PathBuf,

    /// List the stations that produced data
    #[arg(long = "successful", help = "List stations with status OK")]
    pub successful: bool,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

impl Args {
    /// Log level of the selected command
    pub fn get_log_level(&self) -> &'static str {
        match &self.command {
            Some(Commands::Process(args)) => args.get_log_level(),
            Some(Commands::Stations(args)) => level_for(args.verbose),
            Some(Commands::Ledger(args)) => level_for(args.verbose),
            None => level_for(0),
        }
    }

    /// Whether logging should use the compact quiet format
    pub fn is_quiet(&self) -> bool {
        matches!(&self.command, Some(Commands::Process(args)) if args.quiet)
    }
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.inventory_path.exists() {
            return Err(Error::configuration(format!(
                "Inventory file does not exist: {}",
                self.inventory_path.display()
            )));
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(Error::configuration(format!(
                    "Start date {} is after end date {}",
                    start, end
                )));
            }
        }

        Ok(())
    }

    /// Build the batch configuration from the arguments
    pub fn to_config(&self) -> ProcessingConfig {
        let mut config = ProcessingConfig::default()
            .with_inventory_path(self.inventory_path.clone())
            .with_date_window(self.start_date, self.end_date)
            .with_data_type(self.data_type)
            .with_consistency(self.consistency)
            .with_rain_threshold(self.rain_threshold)
            .with_year_ratio_mode(self.year_ratio_mode)
            .with_table_format(self.table_format);

        if let Some(cache_path) = &self.cache_path {
            config = config.with_series_cache_path(cache_path.clone());
        }
        if let Some(output_path) = &self.output_path {
            config = config.with_output_path(output_path.clone());
        }
        if let Some(ledger_path) = &self.ledger_path {
            config = config.with_ledger_path(ledger_path.clone());
        }
        if self.skip_empty_periods {
            config = config.without_empty_periods();
        }
        if self.select {
            config = config.with_station_selection(StationSelection::new(
                self.min_valid_years,
                self.min_valid_ratio,
            ));
        }
        if !self.show_progress() {
            config = config.without_progress();
        }

        config
    }

    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            level_for(self.verbose)
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
