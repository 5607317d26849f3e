//! Cache file layouts
//!
//! Two layouts are accepted, told apart by their header:
//!
//! - **Daily**: `date,value`, one row per day
//! - **Monthly wide**: `month,day01..day31`, one row per month as exported by
//!   the source agency; rows are melted into daily observations

use crate::app::models::RawObservation;
use crate::app::services::date_range::parse_day;
use crate::constants::{
    DAILY_DATE_COLUMN, DAILY_VALUE_COLUMN, MONTHLY_DAY_COLUMNS, MONTHLY_DAY_PREFIX,
    MONTHLY_MONTH_COLUMN,
};
use chrono::{Datelike, NaiveDate};
use csv::StringRecord;

/// Column positions of a recognised cache layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLayout {
    Daily { date: usize, value: usize },
    /// `days[d - 1]` is the column of day `d`
    MonthlyWide { month: usize, days: Vec<usize> },
}

impl CacheLayout {
    /// Detect the layout from a header record, `None` if it matches neither
    pub fn detect(header: &StringRecord) -> Option<Self> {
        let names: Vec<String> = header
            .iter()
            .map(|name| name.trim().trim_start_matches('\u{feff}').to_lowercase())
            .collect();
        let position = |wanted: &str| names.iter().position(|name| name == wanted);

        if let Some(month) = position(MONTHLY_MONTH_COLUMN) {
            let days: Option<Vec<usize>> = (1..=MONTHLY_DAY_COLUMNS)
                .map(|day| position(&format!("{}{:02}", MONTHLY_DAY_PREFIX, day)))
                .collect();
            return days.map(|days| CacheLayout::MonthlyWide { month, days });
        }

        match (position(DAILY_DATE_COLUMN), position(DAILY_VALUE_COLUMN)) {
            (Some(date), Some(value)) => Some(CacheLayout::Daily { date, value }),
            _ => None,
        }
    }

    /// Observations carried by one record
    ///
    /// Rows with an unparsable date yield nothing. A blank daily value is kept
    /// as a missing observation. Monthly rows skip blank cells and days that
    /// do not exist in their month.
    pub fn observations(&self, record: &StringRecord) -> Vec<RawObservation> {
        match self {
            CacheLayout::Daily { date, value } => {
                let Some(day) = record.get(*date).and_then(parse_day) else {
                    return Vec::new();
                };
                vec![observation(day, record.get(*value))]
            }
            CacheLayout::MonthlyWide { month, days } => {
                let Some(month_start) = record.get(*month).and_then(parse_day) else {
                    return Vec::new();
                };

                // Blank cells of the wide grid are not readings
                days.iter()
                    .zip(1..)
                    .filter_map(|(column, day)| {
                        let cell = filled(record.get(*column))?;
                        NaiveDate::from_ymd_opt(month_start.year(), month_start.month(), day)
                            .map(|date| RawObservation::new(date, cell))
                    })
                    .collect()
            }
        }
    }
}

fn observation(date: NaiveDate, cell: Option<&str>) -> RawObservation {
    match filled(cell) {
        Some(raw) => RawObservation::new(date, raw),
        None => RawObservation::missing(date),
    }
}

fn filled(cell: Option<&str>) -> Option<&str> {
    cell.map(str::trim).filter(|cell| !cell.is_empty())
}
