//! Tests for the source gateway module


use crate::config::{ConsistencyLevel, DataType};
use crate::app::services::source_gateway::SeriesRequest;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn rainfall_request(code: &str) -> SeriesRequest {
    SeriesRequest::new(code, DataType::Rainfall, ConsistencyLevel::Raw)
}

/// Write a cached series file for a rainfall/raw request
pub fn write_cached_series(root: &Path, code: &str, content: &str) {
    let dir = root.join("type-2").join("level-1");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{code}.csv")), content).unwrap();
}

/// Header of the monthly wide layout
pub fn monthly_header() -> String {
    let days: Vec<String> = (1..=31).map(|d| format!("day{d:02}")).collect();
    format!("month,{}", days.join(","))
}
