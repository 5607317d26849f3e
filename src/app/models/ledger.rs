//! Data models for the processing ledger
//!
//! One entry is recorded for every station attempted in a batch. Entries
//! snapshot the station attributes so the ledger can be read on its own.

use crate::app::models::StationDescriptor;
use crate::constants::{LEDGER_TRAILING_COLUMNS, STATION_COLUMNS, ledger_status};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of one station attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerStatus {
    /// Statistics were computed and the station joined the matrix
    Ok,
    /// Empty series, fewer than two observations, or a failed fetch
    NoData,
    /// Trailer written when no station in the batch produced data
    NoDataEmptyBatch,
}

impl LedgerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerStatus::Ok => ledger_status::OK,
            LedgerStatus::NoData => ledger_status::NO_DATA,
            LedgerStatus::NoDataEmptyBatch => ledger_status::NO_DATA_EMPTY_BATCH,
        }
    }
}

impl fmt::Display for LedgerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            ledger_status::OK => Ok(LedgerStatus::Ok),
            ledger_status::NO_DATA => Ok(LedgerStatus::NoData),
            ledger_status::NO_DATA_EMPTY_BATCH => Ok(LedgerStatus::NoDataEmptyBatch),
            other => Err(format!("Unknown ledger status '{}'", other)),
        }
    }
}

/// A single ledger row
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub station: StationDescriptor,
    /// Raw rows returned by the source (0 when nothing was returned)
    pub record_count: usize,
    pub date_min: Option<NaiveDate>,
    pub date_max: Option<NaiveDate>,
    pub status: LedgerStatus,
}

impl LedgerEntry {
    /// Entry for a station that produced usable data
    pub fn ok(
        station: &StationDescriptor,
        record_count: usize,
        date_min: NaiveDate,
        date_max: NaiveDate,
    ) -> Self {
        Self {
            station: station.clone(),
            record_count,
            date_min: Some(date_min),
            date_max: Some(date_max),
            status: LedgerStatus::Ok,
        }
    }

    /// Entry for a station without usable data
    pub fn no_data(station: &StationDescriptor) -> Self {
        Self {
            station: station.clone(),
            record_count: 0,
            date_min: None,
            date_max: None,
            status: LedgerStatus::NoData,
        }
    }

    /// Trailer entry marking a batch in which no station produced data
    pub fn empty_batch(last_station: &StationDescriptor) -> Self {
        Self {
            status: LedgerStatus::NoDataEmptyBatch,
            ..Self::no_data(last_station)
        }
    }

    /// Column header shared by every ledger
    pub fn header() -> Vec<String> {
        STATION_COLUMNS
            .iter()
            .chain(LEDGER_TRAILING_COLUMNS.iter())
            .map(|c| c.to_string())
            .collect()
    }

    /// Row fields aligned with [`LedgerEntry::header`]
    pub fn to_row(&self) -> Vec<String> {
        let mut row = self.station.to_fields();
        row.push(self.record_count.to_string());
        row.push(self.date_min.map(|d| d.to_string()).unwrap_or_default());
        row.push(self.date_max.map(|d| d.to_string()).unwrap_or_default());
        row.push(self.status.to_string());
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_strings() {
        for status in [
            LedgerStatus::Ok,
            LedgerStatus::NoData,
            LedgerStatus::NoDataEmptyBatch,
        ] {
            assert_eq!(status.as_str().parse::<LedgerStatus>(), Ok(status));
        }
        assert_eq!(LedgerStatus::NoData.to_string(), "NO DATA");
        assert_eq!(LedgerStatus::NoDataEmptyBatch.to_string(), "NO DATA2");
        assert!("MAYBE".parse::<LedgerStatus>().is_err());
    }

    #[test]
    fn test_row_matches_header() {
        let station = StationDescriptor::new("83088", "IRECE", -11.3, -41.86);
        let entry = LedgerEntry::ok(
            &station,
            42,
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(1995, 6, 30).unwrap(),
        );

        let header = LedgerEntry::header();
        let row = entry.to_row();
        assert_eq!(header.len(), row.len());
        assert_eq!(header.last().map(String::as_str), Some("status"));
        assert_eq!(row.last().map(String::as_str), Some("OK"));
        assert_eq!(row[row.len() - 4], "42");
        assert_eq!(row[row.len() - 3], "1990-01-01");
    }

    #[test]
    fn test_no_data_rows_leave_span_blank() {
        let station = StationDescriptor::new("83088", "IRECE", -11.3, -41.86);
        let row = LedgerEntry::empty_batch(&station).to_row();
        assert_eq!(row[row.len() - 4], "0");
        assert_eq!(row[row.len() - 3], "");
        assert_eq!(row[row.len() - 2], "");
        assert_eq!(row[row.len() - 1], "NO DATA2");
    }
}
