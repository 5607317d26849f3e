//! Data models for station series processing
//!
//! This module contains the core data structures for representing monitoring
//! station metadata, raw daily series and the classified subsets derived from
//! them, plus the temporal resolution keys used for aggregation.

pub mod ledger;

use crate::constants::STATION_COLUMNS;
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use ledger::{LedgerEntry, LedgerStatus};

// =============================================================================
// Station Metadata Structure
// =============================================================================

/// Station descriptor loaded from the inventory
///
/// One descriptor per inventory row; immutable for the duration of a batch.
/// Column names follow the inventory export, with the original Portuguese
/// headers accepted as aliases.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDescriptor {
    /// Unique station code - primary key for the batch
    #[serde(alias = "codigo")]
    pub code: String,

    /// Human-readable station name
    #[serde(alias = "nome")]
    pub name: String,

    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,

    /// Elevation in meters, when surveyed
    #[serde(default)]
    pub altitude: Option<f64>,

    #[serde(default, alias = "municipio")]
    pub municipality: String,

    #[serde(default, alias = "estado")]
    pub state: String,

    #[serde(default, alias = "BaciaCodigo")]
    pub basin_code: String,

    #[serde(default, alias = "SubBaciaCodigo")]
    pub sub_basin_code: String,

    #[serde(default, alias = "Rio")]
    pub river_code: String,

    /// Agency responsible for the station
    #[serde(default, alias = "responsavel")]
    pub responsible_agency: String,

    /// Last update timestamp as published by the inventory
    #[serde(default, alias = "Ultima Atualizacao")]
    pub last_update: Option<String>,
}

impl StationDescriptor {
    /// Create a descriptor with only the identifying fields set
    pub fn new(code: impl Into<String>, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            latitude,
            longitude,
            altitude: None,
            municipality: String::new(),
            state: String::new(),
            basin_code: String::new(),
            sub_basin_code: String::new(),
            river_code: String::new(),
            responsible_agency: String::new(),
            last_update: None,
        }
    }

    /// Validate descriptor data for consistency and valid ranges
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(Error::data_validation("Station code cannot be empty"));
        }

        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::data_validation(format!(
                "Invalid latitude {} for station {}: must be between -90 and 90 degrees",
                self.latitude, self.code
            )));
        }

        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::data_validation(format!(
                "Invalid longitude {} for station {}: must be between -180 and 180 degrees",
                self.longitude, self.code
            )));
        }

        Ok(())
    }

    /// Station attributes as text fields, in [`STATION_COLUMNS`] order
    pub fn to_fields(&self) -> Vec<String> {
        let fields = vec![
            self.code.clone(),
            self.name.clone(),
            self.latitude.to_string(),
            self.longitude.to_string(),
            self.altitude.map(|a| a.to_string()).unwrap_or_default(),
            self.municipality.clone(),
            self.state.clone(),
            self.basin_code.clone(),
            self.sub_basin_code.clone(),
            self.river_code.clone(),
            self.responsible_agency.clone(),
            self.last_update.clone().unwrap_or_default(),
        ];
        debug_assert_eq!(fields.len(), STATION_COLUMNS.len());
        fields
    }
}

// =============================================================================
// Raw Series
// =============================================================================

/// One raw daily reading as delivered by the source
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    pub date: NaiveDate,
    /// Cell content; `None` when the source left it blank
    pub raw_value: Option<String>,
}

impl RawObservation {
    pub fn new(date: NaiveDate, raw_value: impl Into<String>) -> Self {
        Self {
            date,
            raw_value: Some(raw_value.into()),
        }
    }

    pub fn missing(date: NaiveDate) -> Self {
        Self {
            date,
            raw_value: None,
        }
    }
}

/// Raw daily series for one station, in source order
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSeries {
    pub station_code: String,
    pub observations: Vec<RawObservation>,
}

impl ObservationSeries {
    pub fn new(station_code: impl Into<String>, observations: Vec<RawObservation>) -> Self {
        Self {
            station_code: station_code.into(),
            observations,
        }
    }

    /// Number of raw rows, including blanks and duplicates
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

// =============================================================================
// Classified Subsets
// =============================================================================

/// A present numeric value on one day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyValue {
    pub date: NaiveDate,
    pub value: f64,
}

/// Named subsets derived from a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubsetKind {
    /// Every numeric value
    All,
    /// Values >= 0
    Valid,
    /// Values >= the configured rain threshold
    AboveThreshold,
    /// Values >= 0.1
    Nonzero,
}

impl SubsetKind {
    /// All subset kinds in reporting order
    pub const ALL_KINDS: [SubsetKind; 4] = [
        SubsetKind::All,
        SubsetKind::Valid,
        SubsetKind::AboveThreshold,
        SubsetKind::Nonzero,
    ];

    /// Short label used as a column prefix in output tables
    pub fn label(&self) -> &'static str {
        match self {
            SubsetKind::All => "all",
            SubsetKind::Valid => "valid",
            SubsetKind::AboveThreshold => "ldu",
            SubsetKind::Nonzero => "nz",
        }
    }
}

impl fmt::Display for SubsetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubsetKind::All => "ALL",
            SubsetKind::Valid => "VALID",
            SubsetKind::AboveThreshold => "ABOVE_THRESHOLD",
            SubsetKind::Nonzero => "NONZERO",
        };
        f.write_str(name)
    }
}

/// A chronologically ordered, date-unique view over a series
#[derive(Debug, Clone, PartialEq)]
pub struct Subset {
    kind: SubsetKind,
    values: Vec<DailyValue>,
}

impl Subset {
    /// Build a subset from values already ordered and unique by date
    pub fn new(kind: SubsetKind, values: Vec<DailyValue>) -> Self {
        debug_assert!(values.windows(2).all(|w| w[0].date < w[1].date));
        Self { kind, values }
    }

    pub fn kind(&self) -> SubsetKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[DailyValue] {
        &self.values
    }

    /// Keep the values matching a predicate, as a new subset of another kind
    pub fn filter(&self, kind: SubsetKind, predicate: impl Fn(f64) -> bool) -> Subset {
        Subset {
            kind,
            values: self
                .values
                .iter()
                .copied()
                .filter(|v| predicate(v.value))
                .collect(),
        }
    }

    /// Values falling inside a period
    pub fn in_period(&self, period: PeriodKey) -> impl Iterator<Item = f64> + '_ {
        self.values
            .iter()
            .filter(move |v| period.contains(v.date))
            .map(|v| v.value)
    }

    /// Number of values falling inside a period
    pub fn count_in(&self, period: PeriodKey) -> usize {
        self.in_period(period).count()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.values.first().map(|v| v.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.values.last().map(|v| v.date)
    }

    /// Inclusive calendar-year range covered by the subset
    pub fn year_range(&self) -> Option<(i32, i32)> {
        Some((self.first_date()?.year(), self.last_date()?.year()))
    }
}

// =============================================================================
// Temporal Resolution
// =============================================================================

/// Temporal aggregation granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// Whole observed span
    Overall,
    /// One calendar month pooled across years
    Month,
    /// One calendar year
    Year,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resolution::Overall => "OVERALL",
            Resolution::Month => "MONTH",
            Resolution::Year => "YEAR",
        };
        f.write_str(name)
    }
}

/// A resolution together with the period it selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKey {
    Overall,
    /// Calendar month 1..=12
    Month(u32),
    Year(i32),
}

impl PeriodKey {
    pub fn resolution(&self) -> Resolution {
        match self {
            PeriodKey::Overall => Resolution::Overall,
            PeriodKey::Month(_) => Resolution::Month,
            PeriodKey::Year(_) => Resolution::Year,
        }
    }

    /// Whether a day belongs to this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            PeriodKey::Overall => true,
            PeriodKey::Month(month) => date.month() == month,
            PeriodKey::Year(year) => date.year() == year,
        }
    }
}
