//! Tests for batch processing

pub mod compiler_tests;
pub mod orchestrator_tests;

use crate::app::models::{ObservationSeries, RawObservation, StationDescriptor};
use crate::app::services::source_gateway::{
    FetchOutcome, SeriesRequest, SourceGateway, TransportError,
};
use crate::config::ProcessingConfig;
use chrono::NaiveDate;
use std::collections::HashMap;

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn create_test_station(code: &str) -> StationDescriptor {
    let mut station = StationDescriptor::new(code, format!("STATION {code}"), -12.0, -41.0);
    station.state = "BAHIA".to_string();
    station
}

pub fn quiet_config() -> ProcessingConfig {
    ProcessingConfig::default().without_progress()
}

/// Series from `(day, value)` pairs
pub fn create_test_series(code: &str, values: &[(NaiveDate, f64)]) -> ObservationSeries {
    ObservationSeries::new(
        code,
        values
            .iter()
            .map(|(date, value)| RawObservation::new(*date, value.to_string()))
            .collect(),
    )
}

/// 730 records over 2000-01-01..=2001-12-31 (one interior day missing),
/// 380 non-negative readings followed by 350 negative ones
pub fn two_year_series(code: &str) -> ObservationSeries {
    let values: Vec<(NaiveDate, f64)> = (0..731)
        .map(|i| day(2000, 1, 1) + chrono::Duration::days(i))
        .filter(|date| *date != day(2000, 6, 15))
        .enumerate()
        .map(|(i, date)| (date, if i < 380 { 2.5 } else { -1.0 }))
        .collect();
    create_test_series(code, &values)
}

pub enum FakeResponse {
    Series(ObservationSeries),
    Empty,
    Fail,
}

/// Gateway answering from a fixed table; unknown stations are empty
#[derive(Default)]
pub struct FakeGateway {
    responses: HashMap<String, FakeResponse>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, code: &str, response: FakeResponse) -> Self {
        self.responses.insert(code.to_string(), response);
        self
    }
}

impl SourceGateway for FakeGateway {
    async fn fetch(&self, request: &SeriesRequest) -> Result<FetchOutcome, TransportError> {
        match self.responses.get(&request.station_code) {
            Some(FakeResponse::Series(series)) => Ok(FetchOutcome::Series(series.clone())),
            Some(FakeResponse::Fail) => Err(TransportError::Unavailable {
                station: request.station_code.clone(),
                message: "connection reset".to_string(),
            }),
            Some(FakeResponse::Empty) | None => Ok(FetchOutcome::Empty),
        }
    }
}
