//! Application constants for the Hidro processor
//!
//! This module contains classification thresholds, calendar constants,
//! ledger vocabulary and output naming used throughout the application.

// =============================================================================
// Classification Thresholds
// =============================================================================

/// Default minimum accumulation (mm) for a day to count as a rain day
pub const DEFAULT_RAIN_THRESHOLD: f64 = 1.0;

/// Minimum accumulation (mm) for a day to count as non-zero rainfall
pub const NONZERO_THRESHOLD: f64 = 0.1;

/// Lower bound (inclusive) for a value to be considered valid
pub const VALID_LOWER_BOUND: f64 = 0.0;

/// Minimum number of numeric observations needed to establish a date span
pub const MIN_OBSERVATIONS: usize = 2;

// =============================================================================
// Station Selection
// =============================================================================

/// Default minimum valid-years count for a station to be selected
pub const DEFAULT_MIN_VALID_YEARS: i64 = 24;

/// Default minimum overall IDV (percent) for a station to be selected
pub const DEFAULT_MIN_VALID_RATIO: f64 = 80.0;

// =============================================================================
// Calendar Constants
// =============================================================================

/// Mean length of a year in days, used to turn a day span into years
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Multiplier used for the "mean per month" statistic
pub const MONTH_SCALE: f64 = 30.0;

/// Multiplier used for the "mean per year" statistic
pub const YEAR_SCALE: f64 = 365.0;

/// Months with 30 days
pub const THIRTY_DAY_MONTHS: &[u32] = &[4, 6, 9, 11];

// =============================================================================
// Processing Ledger
// =============================================================================

/// Ledger status values as written to the ledger artifact
pub mod ledger_status {
    /// Station produced usable data
    pub const OK: &str = "OK";

    /// Station had no data (empty, insufficient or failed fetch)
    pub const NO_DATA: &str = "NO DATA";

    /// Whole batch produced no station with data
    pub const NO_DATA_EMPTY_BATCH: &str = "NO DATA2";
}

/// Ledger columns appended after the station attribute columns
pub const LEDGER_TRAILING_COLUMNS: &[&str] = &["recordCount", "dateMin", "dateMax", "status"];

/// Name of the ledger status column
pub const LEDGER_STATUS_COLUMN: &str = "status";

/// Default ledger file name
pub const DEFAULT_LEDGER_FILE: &str = "history.csv";

// =============================================================================
// Station Inventory
// =============================================================================

/// Inventory columns, in the order they are written back out
pub const STATION_COLUMNS: &[&str] = &[
    "code",
    "name",
    "latitude",
    "longitude",
    "altitude",
    "municipality",
    "state",
    "basinCode",
    "subBasinCode",
    "riverCode",
    "responsibleAgency",
    "lastUpdate",
];

// =============================================================================
// Source Gateway Cache
// =============================================================================

/// Date formats accepted for observation timestamps, tried in order
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Date-time formats accepted for observation timestamps, tried in order
pub const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Number of day columns in a monthly wide row
pub const MONTHLY_DAY_COLUMNS: u32 = 31;

/// Header of the day column in daily cache files
pub const DAILY_DATE_COLUMN: &str = "date";

/// Header of the value column in daily cache files
pub const DAILY_VALUE_COLUMN: &str = "value";

/// Header of the month column in monthly wide cache files
pub const MONTHLY_MONTH_COLUMN: &str = "month";

/// Prefix of the day columns in monthly wide cache files (`day01`..`day31`)
pub const MONTHLY_DAY_PREFIX: &str = "day";

/// Extension of cached series files
pub const SERIES_FILE_EXTENSION: &str = "csv";

// =============================================================================
// Output Tables
// =============================================================================

/// Directory holding the statistics tables
pub const SUMMARY_DIR_NAME: &str = "summary";

/// Directory holding the time-series matrix and the ledger manifest
pub const SERIES_DIR_NAME: &str = "series";

/// Directory holding the summary tables of the selected stations
pub const SELECTION_DIR_NAME: &str = "selection";

/// Per-station overall summary table
pub const ANNUAL_TABLE: &str = "ANNUAL";

/// Per-station-year table
pub const YEARLY_TABLE: &str = "YEARLY";

/// Per-station-month table (all months)
pub const MONTHLY_TABLE: &str = "MONTHLY";

/// Prefix of the twelve per-month tables
pub const MONTHLY_TABLE_PREFIX: &str = "MONTHLY_";

/// Combined time-series matrix
pub const MATRIX_TABLE: &str = "DATA";

/// Ledger manifest of successful stations
pub const HISTORY_TABLE: &str = "HISTORY";

/// Name of the date column in the time-series matrix
pub const MATRIX_DATE_COLUMN: &str = "date";

/// Application data directory name used for default paths
pub const APP_DIR_NAME: &str = "hidro-processor";
