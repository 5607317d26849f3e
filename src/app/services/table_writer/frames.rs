//! DataFrame construction for compiled results
//!
//! Every table starts with the station identity columns, followed by the
//! table's own figures and one block of statistics columns per subset, named
//! `<subset>_<field>` (for example `valid_p95` or `nz_mean`).

use crate::app::models::{PeriodKey, StationDescriptor, SubsetKind};
use crate::app::services::batch::{AnnualRow, PeriodRow, SeriesMatrix};
use crate::app::services::ledger::LedgerTable;
use crate::app::services::statistics::{CompletenessIndex, StatisticsBlock, StatisticsSet};
use crate::constants::MATRIX_DATE_COLUMN;
use crate::{Error, Result};
use polars::prelude::*;

/// ANNUAL table: one row per station
pub fn annual_frame(rows: &[AnnualRow]) -> Result<DataFrame> {
    let mut columns = station_columns(rows.iter().map(|row| &row.station));

    let summaries: Vec<_> = rows.iter().map(|row| &row.summary).collect();
    columns.extend([
        Column::new(
            "recordCount".into(),
            summaries.iter().map(|s| s.record_count as u64).collect::<Vec<_>>(),
        ),
        Column::new(
            "numericCount".into(),
            summaries.iter().map(|s| s.numeric_count as u64).collect::<Vec<_>>(),
        ),
        Column::new(
            "dateMin".into(),
            summaries.iter().map(|s| s.span.date_min.to_string()).collect::<Vec<_>>(),
        ),
        Column::new(
            "dateMax".into(),
            summaries.iter().map(|s| s.span.date_max.to_string()).collect::<Vec<_>>(),
        ),
        Column::new(
            "totalDays".into(),
            summaries.iter().map(|s| s.span.total_days).collect::<Vec<_>>(),
        ),
        Column::new(
            "totalYears".into(),
            summaries.iter().map(|s| s.span.total_years).collect::<Vec<_>>(),
        ),
        Column::new(
            "validYears".into(),
            summaries.iter().map(|s| s.valid_years).collect::<Vec<_>>(),
        ),
    ]);
    columns.extend(completeness_columns(summaries.iter().map(|s| &s.completeness)));
    columns.extend(statistics_columns(summaries.iter().map(|s| &s.statistics)));

    build("ANNUAL", columns)
}

/// MONTHLY or YEARLY table: one row per station and period
pub fn period_frame<'a>(rows: impl IntoIterator<Item = &'a PeriodRow>) -> Result<DataFrame> {
    let rows: Vec<&PeriodRow> = rows.into_iter().collect();
    let mut columns = station_columns(rows.iter().map(|row| &row.station));

    let (resolution, periods): (Vec<&str>, Vec<Option<i64>>) = rows
        .iter()
        .map(|row| match row.period() {
            PeriodKey::Month(month) => ("month", Some(month as i64)),
            PeriodKey::Year(year) => ("year", Some(year as i64)),
            PeriodKey::Overall => ("overall", None),
        })
        .unzip();

    let summaries: Vec<_> = rows.iter().map(|row| &row.summary).collect();
    columns.extend([
        Column::new(
            "resolution".into(),
            resolution.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
        ),
        Column::new("period".into(), periods),
        Column::new(
            "validDaysEstimate".into(),
            summaries.iter().map(|s| s.valid_days_estimate).collect::<Vec<_>>(),
        ),
    ]);
    columns.extend(completeness_columns(summaries.iter().map(|s| &s.completeness)));
    columns.extend(statistics_columns(summaries.iter().map(|s| &s.statistics)));

    build("period", columns)
}

/// Time-series matrix: `date` followed by one column per station
pub fn matrix_frame(matrix: &SeriesMatrix) -> Result<DataFrame> {
    let mut columns = vec![Column::new(
        MATRIX_DATE_COLUMN.into(),
        matrix.dates().iter().map(|d| d.to_string()).collect::<Vec<_>>(),
    )];
    columns.extend(
        matrix
            .columns()
            .map(|(code, values)| Column::new(code.into(), values)),
    );

    build("DATA", columns)
}

/// Ledger rows as text columns
pub fn ledger_frame(table: &LedgerTable) -> Result<DataFrame> {
    let columns = table
        .header
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let values: Vec<Option<String>> =
                table.rows.iter().map(|row| row.get(index).cloned()).collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();

    build("HISTORY", columns)
}

fn build(table: &str, columns: Vec<Column>) -> Result<DataFrame> {
    DataFrame::new(columns)
        .map_err(|e| Error::table_writing(format!("Failed to assemble {} table", table), e))
}

fn station_columns<'a>(stations: impl Iterator<Item = &'a StationDescriptor>) -> Vec<Column> {
    let stations: Vec<_> = stations.collect();
    let text = |name: &str, field: fn(&StationDescriptor) -> String| {
        Column::new(
            name.into(),
            stations.iter().map(|s| field(s)).collect::<Vec<_>>(),
        )
    };

    vec![
        text("code", |s| s.code.clone()),
        text("name", |s| s.name.clone()),
        Column::new(
            "latitude".into(),
            stations.iter().map(|s| s.latitude).collect::<Vec<_>>(),
        ),
        Column::new(
            "longitude".into(),
            stations.iter().map(|s| s.longitude).collect::<Vec<_>>(),
        ),
        Column::new(
            "altitude".into(),
            stations.iter().map(|s| s.altitude).collect::<Vec<_>>(),
        ),
        text("municipality", |s| s.municipality.clone()),
        text("state", |s| s.state.clone()),
        text("basinCode", |s| s.basin_code.clone()),
        text("subBasinCode", |s| s.sub_basin_code.clone()),
        text("riverCode", |s| s.river_code.clone()),
        text("responsibleAgency", |s| s.responsible_agency.clone()),
        text("lastUpdate", |s| s.last_update.clone().unwrap_or_default()),
    ]
}

fn completeness_columns<'a>(
    indices: impl Iterator<Item = &'a CompletenessIndex>,
) -> Vec<Column> {
    let indices: Vec<_> = indices.collect();
    let count = |name: &str, field: fn(&CompletenessIndex) -> usize| {
        Column::new(
            name.into(),
            indices.iter().map(|i| field(i) as u64).collect::<Vec<_>>(),
        )
    };
    let ratio = |name: &str, field: fn(&CompletenessIndex) -> f64| {
        Column::new(name.into(), indices.iter().map(|i| field(i)).collect::<Vec<_>>())
    };

    vec![
        Column::new(
            "periodDays".into(),
            indices.iter().map(|i| i.period_days).collect::<Vec<_>>(),
        ),
        count("valid_count", |i| i.valid_count),
        count("ldu_count", |i| i.above_threshold_count),
        count("nz_count", |i| i.nonzero_count),
        ratio("idv", |i| i.valid_ratio),
        ratio("idv_ldu", |i| i.above_threshold_ratio),
        ratio("idv_nz", |i| i.nonzero_ratio),
    ]
}

fn statistics_columns<'a>(sets: impl Iterator<Item = &'a StatisticsSet>) -> Vec<Column> {
    let sets: Vec<_> = sets.collect();
    let mut columns = Vec::new();

    for kind in SubsetKind::ALL_KINDS {
        let blocks: Vec<&StatisticsBlock> = sets.iter().map(|set| set.get(kind)).collect();
        let values: Vec<[Option<f64>; 15]> = blocks.iter().map(|b| b.values()).collect();

        columns.push(Column::new(
            format!("{}_n", kind.label()).into(),
            blocks.iter().map(|b| b.count as u64).collect::<Vec<_>>(),
        ));
        for (index, field) in StatisticsBlock::FIELD_NAMES.iter().enumerate() {
            columns.push(Column::new(
                format!("{}_{}", kind.label(), field).into(),
                values.iter().map(|v| v[index]).collect::<Vec<_>>(),
            ));
        }
    }

    columns
}
