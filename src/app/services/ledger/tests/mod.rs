//! Tests for the processing ledger


use crate::app::models::{LedgerEntry, StationDescriptor};

pub fn create_test_station(code: &str) -> StationDescriptor {
    let mut station = StationDescriptor::new(code, format!("STATION {code}"), -12.5, -40.25);
    station.state = "BAHIA".to_string();
    station
}

pub fn header() -> Vec<String> {
    LedgerEntry::header()
}
