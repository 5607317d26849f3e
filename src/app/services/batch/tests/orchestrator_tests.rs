//! Tests for the batch orchestrator

use super::*;
use crate::app::models::LedgerStatus;
use crate::app::services::batch::{BatchProcessor, NoDataReason, StationOutcome};
use crate::app::services::ledger::{LedgerSink, MemoryLedger};

#[tokio::test]
async fn test_mixed_batch() {
    let gateway = FakeGateway::new()
        .with("A", FakeResponse::Series(two_year_series("A")))
        .with("B", FakeResponse::Empty)
        .with("C", FakeResponse::Series(create_test_series("C", &[(day(2005, 3, 1), 4.0)])));
    let stations = vec![
        create_test_station("A"),
        create_test_station("B"),
        create_test_station("C"),
    ];

    let mut processor = BatchProcessor::new(gateway, MemoryLedger::new(), quiet_config());
    let outcome = processor.run(&stations).await.unwrap();

    assert_eq!(outcome.stats.attempted, 3);
    assert_eq!(outcome.stats.ok, 1);
    assert_eq!(outcome.stats.no_data, 2);
    assert_eq!(outcome.stats.empty_series, 1);
    assert_eq!(outcome.stats.insufficient_records, 1);
    assert!(!outcome.stats.empty_batch_trailer);

    let annual = &outcome.results.annual;
    assert_eq!(annual.len(), 1);
    assert!((annual[0].summary.completeness.valid_ratio - 52.05).abs() < 0.01);
    assert_eq!(annual[0].summary.record_count, 730);
    assert_eq!(outcome.results.matrix.station_codes(), vec!["A"]);

    let ledger = processor.ledger().read_all().unwrap();
    assert_eq!(ledger.len(), 3);
    assert_eq!(
        ledger.statuses(),
        vec![
            Some(LedgerStatus::Ok),
            Some(LedgerStatus::NoData),
            Some(LedgerStatus::NoData)
        ]
    );
    assert_eq!(outcome.history.len(), 1);
    assert_eq!(outcome.history.rows[0][0], "A");
}

#[tokio::test]
async fn test_transport_failure_does_not_abort_batch() {
    let gateway = FakeGateway::new()
        .with("A", FakeResponse::Fail)
        .with("B", FakeResponse::Series(two_year_series("B")));
    let stations = vec![create_test_station("A"), create_test_station("B")];

    let mut processor = BatchProcessor::new(gateway, MemoryLedger::new(), quiet_config());
    let outcome = processor.run(&stations).await.unwrap();

    assert_eq!(outcome.stats.transport_failures, 1);
    assert_eq!(outcome.stats.ok, 1);
    assert_eq!(processor.ledger().read_all().unwrap().len(), 2);
}

#[tokio::test]
async fn test_all_failed_batch_writes_trailer() {
    let gateway = FakeGateway::new().with("B", FakeResponse::Fail);
    let stations = vec![create_test_station("A"), create_test_station("B")];

    let mut processor = BatchProcessor::new(gateway, MemoryLedger::new(), quiet_config());
    let outcome = processor.run(&stations).await.unwrap();

    let ledger = processor.into_ledger().read_all().unwrap();
    assert_eq!(ledger.len(), 3);
    assert_eq!(ledger.statuses()[2], Some(LedgerStatus::NoDataEmptyBatch));
    assert_eq!(ledger.rows[2][0], "B");
    assert!(outcome.stats.empty_batch_trailer);
    assert!(outcome.results.annual.is_empty());
    assert!(outcome.history.is_empty());
}

#[tokio::test]
async fn test_empty_station_list() {
    let mut processor = BatchProcessor::new(FakeGateway::new(), MemoryLedger::new(), quiet_config());
    let outcome = processor.run(&[]).await.unwrap();

    assert_eq!(outcome.stats.attempted, 0);
    assert!(!outcome.stats.empty_batch_trailer);
    let ledger = processor.ledger().read_all().unwrap();
    assert!(ledger.is_empty());
    assert!(!ledger.header.is_empty());
}

#[tokio::test]
async fn test_unparsable_cells_count_toward_insufficient_records() {
    let mut series = create_test_series("A", &[(day(2010, 1, 1), 3.0)]);
    series
        .observations
        .push(crate::app::models::RawObservation::new(day(2010, 1, 2), "x"));
    let gateway = FakeGateway::new().with("A", FakeResponse::Series(series));
    let processor = BatchProcessor::new(gateway, MemoryLedger::new(), quiet_config());

    let outcome = processor.process_station(&create_test_station("A")).await;

    match outcome {
        StationOutcome::NoData {
            reason: NoDataReason::InsufficientRecords { numeric },
            entry,
        } => {
            assert_eq!(numeric, 1);
            assert_eq!(entry.status, LedgerStatus::NoData);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[tokio::test]
async fn test_ok_entry_records_raw_count_and_span() {
    let gateway = FakeGateway::new().with("A", FakeResponse::Series(two_year_series("A")));
    let processor = BatchProcessor::new(gateway, MemoryLedger::new(), quiet_config());

    let outcome = processor.process_station(&create_test_station("A")).await;
    let entry = outcome.entry();

    assert_eq!(entry.status, LedgerStatus::Ok);
    assert_eq!(entry.record_count, 730);
    assert_eq!(entry.date_min, Some(day(2000, 1, 1)));
    assert_eq!(entry.date_max, Some(day(2001, 12, 31)));
}

#[tokio::test]
async fn test_invalid_config_fails_before_ledger_is_touched() {
    let config = quiet_config().with_rain_threshold(-1.0);
    let mut processor = BatchProcessor::new(FakeGateway::new(), MemoryLedger::new(), config);

    assert!(processor.run(&[create_test_station("A")]).await.is_err());
    assert!(processor.ledger().read_all().is_err());
}
