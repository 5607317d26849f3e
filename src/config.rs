//! Configuration management and validation.
//!
//! Provides the single immutable configuration value handed to the batch
//! orchestrator: input and output locations, the fetch window, source codes,
//! classification thresholds and the completeness formula selection.

use crate::constants::{
    APP_DIR_NAME, DEFAULT_LEDGER_FILE, DEFAULT_MIN_VALID_RATIO, DEFAULT_MIN_VALID_YEARS,
    DEFAULT_RAIN_THRESHOLD,
};
use crate::{Error, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Measurement type requested from the series source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum DataType {
    /// River stage (code 1)
    Stage,
    /// Daily rainfall (code 2)
    Rainfall,
    /// River flow (code 3)
    Flow,
}

impl DataType {
    /// Numeric code used by the series source
    pub fn code(&self) -> u8 {
        match self {
            DataType::Stage => 1,
            DataType::Rainfall => 2,
            DataType::Flow => 3,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Consistency level of the requested readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum ConsistencyLevel {
    /// Raw readings (code 1)
    Raw,
    /// Readings that passed quality control (code 2)
    Consisted,
}

impl ConsistencyLevel {
    /// Numeric code used by the series source
    pub fn code(&self) -> u8 {
        match self {
            ConsistencyLevel::Raw => 1,
            ConsistencyLevel::Consisted => 2,
        }
    }
}

impl fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Numerator used for the NONZERO and ABOVE_THRESHOLD ratios at year resolution
///
/// Historical outputs divided the VALID count for all three yearly ratios.
/// Station selection downstream was calibrated against those numbers, so the
/// historical formula stays the default and the corrected one is opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum YearRatioMode {
    /// Every yearly ratio uses the VALID numerator
    Historical,
    /// Each yearly ratio uses its own subset count
    Corrected,
}

/// File format for emitted tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Parquet => "parquet",
        }
    }
}

/// Thresholds of the station selection applied after a batch
///
/// A station is kept when both its valid-years count and its overall IDV
/// reach the thresholds (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationSelection {
    pub min_valid_years: i64,
    /// Percent
    pub min_valid_ratio: f64,
}

impl StationSelection {
    pub fn new(min_valid_years: i64, min_valid_ratio: f64) -> Self {
        Self {
            min_valid_years,
            min_valid_ratio,
        }
    }
}

impl Default for StationSelection {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_VALID_YEARS, DEFAULT_MIN_VALID_RATIO)
    }
}

/// Global configuration for a processing batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Station inventory CSV
    pub inventory_path: PathBuf,

    /// Root of the local series cache read by the source gateway
    pub series_cache_path: PathBuf,

    /// Directory receiving the output tables
    pub output_path: PathBuf,

    /// Processing ledger file
    pub ledger_path: PathBuf,

    /// First day requested from the source (inclusive), `None` for the full record
    pub start_date: Option<NaiveDate>,

    /// Last day requested from the source (inclusive), `None` for the full record
    pub end_date: Option<NaiveDate>,

    /// Measurement type requested from the source
    pub data_type: DataType,

    /// Consistency level requested from the source
    pub consistency: ConsistencyLevel,

    /// Minimum accumulation for the ABOVE_THRESHOLD subset
    pub rain_threshold: f64,

    /// Yearly NONZERO / ABOVE_THRESHOLD ratio formula
    pub year_ratio_mode: YearRatioMode,

    /// Emit monthly and yearly rows for periods without any valid observation
    pub include_empty_periods: bool,

    /// Output table format
    pub table_format: TableFormat,

    /// Show a progress bar during the batch
    pub show_progress: bool,

    /// Station selection written next to the summaries, `None` to skip it
    pub station_selection: Option<StationSelection>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME);
        let output_path = PathBuf::from("./output");

        Self {
            inventory_path: PathBuf::from("inventory.csv"),
            series_cache_path: base.join("cache"),
            ledger_path: output_path.join(DEFAULT_LEDGER_FILE),
            output_path,
            start_date: None,
            end_date: None,
            data_type: DataType::Rainfall,
            consistency: ConsistencyLevel::Raw,
            rain_threshold: DEFAULT_RAIN_THRESHOLD,
            year_ratio_mode: YearRatioMode::Historical,
            include_empty_periods: true,
            table_format: TableFormat::Csv,
            show_progress: true,
            station_selection: None,
        }
    }
}

impl ProcessingConfig {
    /// Set the inventory path
    pub fn with_inventory_path(mut self, path: PathBuf) -> Self {
        self.inventory_path = path;
        self
    }

    /// Set the series cache root
    pub fn with_series_cache_path(mut self, path: PathBuf) -> Self {
        self.series_cache_path = path;
        self
    }

    /// Set the output directory; the ledger follows unless set explicitly afterwards
    pub fn with_output_path(mut self, path: PathBuf) -> Self {
        self.ledger_path = path.join(DEFAULT_LEDGER_FILE);
        self.output_path = path;
        self
    }

    /// Set the ledger file
    pub fn with_ledger_path(mut self, path: PathBuf) -> Self {
        self.ledger_path = path;
        self
    }

    /// Restrict the fetch window
    pub fn with_date_window(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Set the requested data type
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    /// Set the requested consistency level
    pub fn with_consistency(mut self, consistency: ConsistencyLevel) -> Self {
        self.consistency = consistency;
        self
    }

    /// Set the rain-day threshold
    pub fn with_rain_threshold(mut self, threshold: f64) -> Self {
        self.rain_threshold = threshold;
        self
    }

    /// Select the yearly ratio formula
    pub fn with_year_ratio_mode(mut self, mode: YearRatioMode) -> Self {
        self.year_ratio_mode = mode;
        self
    }

    /// Omit monthly and yearly rows for periods without valid observations
    pub fn without_empty_periods(mut self) -> Self {
        self.include_empty_periods = false;
        self
    }

    /// Set the output table format
    pub fn with_table_format(mut self, format: TableFormat) -> Self {
        self.table_format = format;
        self
    }

    /// Select stations by valid years and overall IDV after the batch
    pub fn with_station_selection(mut self, selection: StationSelection) -> Self {
        self.station_selection = Some(selection);
        self
    }

    /// Disable the progress bar
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Validate the configuration before a batch starts
    pub fn validate(&self) -> Result<()> {
        if !self.rain_threshold.is_finite() || self.rain_threshold < 0.0 {
            return Err(Error::configuration(format!(
                "Rain threshold must be a non-negative number, got {}",
                self.rain_threshold
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

        if let Some(selection) = &self.station_selection {
            if selection.min_valid_years < 0 {
                return Err(Error::configuration(format!(
                    "Minimum valid years cannot be negative, got {}",
                    selection.min_valid_years
                )));
            }
            if !(0.0..=100.0).contains(&selection.min_valid_ratio) {
                return Err(Error::configuration(format!(
                    "Minimum IDV must lie within 0..=100, got {}",
                    selection.min_valid_ratio
                )));
            }
        }

        if self.ledger_path.as_os_str().is_empty() {
            return Err(Error::configuration("Ledger path cannot be empty"));
        }

        debug!(
            "Configuration validated: threshold {} mm, data type {}, consistency {}, year ratios {:?}",
            self.rain_threshold, self.data_type, self.consistency, self.year_ratio_mode
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ProcessingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rain_threshold, 1.0);
        assert_eq!(config.year_ratio_mode, YearRatioMode::Historical);
        assert!(config.include_empty_periods);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let config = ProcessingConfig::default().with_rain_threshold(-0.5);
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let config = ProcessingConfig::default().with_rain_threshold(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let config = ProcessingConfig::default().with_date_window(
            NaiveDate::from_ymd_opt(2020, 1, 1),
            NaiveDate::from_ymd_opt(2019, 1, 1),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_path_moves_ledger() {
        let config = ProcessingConfig::default().with_output_path(PathBuf::from("/tmp/run"));
        assert_eq!(config.ledger_path, PathBuf::from("/tmp/run/history.csv"));

        let config = config.with_ledger_path(PathBuf::from("/tmp/ledger.csv"));
        assert_eq!(config.ledger_path, PathBuf::from("/tmp/ledger.csv"));
    }

    #[test]
    fn test_station_selection_thresholds_validated() {
        let select = |selection| ProcessingConfig::default().with_station_selection(selection);

        let config = select(StationSelection::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.station_selection, Some(StationSelection::new(24, 80.0)));

        assert!(select(StationSelection::new(24, 120.0)).validate().is_err());
        assert!(select(StationSelection::new(-1, 80.0)).validate().is_err());
        assert!(select(StationSelection::new(24, f64::NAN)).validate().is_err());
    }

    #[test]
    fn test_source_codes() {
        assert_eq!(DataType::Rainfall.code(), 2);
        assert_eq!(DataType::Stage.to_string(), "1");
        assert_eq!(ConsistencyLevel::Consisted.code(), 2);
        assert_eq!(TableFormat::Parquet.extension(), "parquet");
    }
}
