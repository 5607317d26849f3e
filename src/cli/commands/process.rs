//! Process command: run a batch over the station inventory

use crate::app::services::batch::{BatchOutcome, BatchProcessor};
use crate::app::services::ledger::CsvLedger;
use crate::app::services::source_gateway::CsvCacheGateway;
use crate::app::services::station_inventory::StationInventory;
use crate::app::services::table_writer::TableWriter;
use crate::cli::args::ProcessArgs;
use crate::config::ProcessingConfig;
use crate::Result;
use colored::*;
use indicatif::HumanDuration;
use std::path::PathBuf;
use tracing::{debug, info};

/// Run the batch and write every output table
pub async fn run_process(args: ProcessArgs) -> Result<()> {
    debug!("Process arguments: {:?}", args);
    args.validate()?;

    let config = args.to_config();
    config.validate()?;
    debug!("Processing configuration: {:?}", config);

    let (inventory, load_stats) = StationInventory::load(&config.inventory_path).await?;
    if load_stats.has_rejections() {
        info!(
            "{} inventory rows skipped, {} duplicate codes ignored",
            load_stats.rows_skipped, load_stats.duplicates
        );
    }

    if args.dry_run {
        print_dry_run(&config, &inventory);
        return Ok(());
    }

    let gateway = CsvCacheGateway::new(config.series_cache_path.clone());
    let ledger = CsvLedger::new(config.ledger_path.clone());
    let writer = TableWriter::new(config.output_path.clone(), config.table_format);
    let show_summary = config.show_progress;

    let mut processor = BatchProcessor::new(gateway, ledger, config);
    let outcome = processor.run(inventory.stations()).await?;

    let mut written = writer.write_all(&outcome.results, &outcome.history).await?;

    let selection = processor.config().station_selection;
    let selected = selection.map(|selection| {
        outcome
            .results
            .select_stations(selection.min_valid_years, selection.min_valid_ratio)
    });
    if let Some(selected) = &selected {
        written.extend(writer.write_selection(selected).await?);
    }

    if show_summary {
        print_summary(&outcome, processor.config(), &written);
        if let (Some(selection), Some(selected)) = (selection, &selected) {
            println!(
                "   • Selected: {} of {} stations (valid years >= {}, IDV >= {}%)",
                selected.station_count().to_string().green(),
                outcome.results.station_count(),
                selection.min_valid_years,
                selection.min_valid_ratio
            );
            println!();
        }
    }
    Ok(())
}

fn print_dry_run(config: &ProcessingConfig, inventory: &StationInventory) {
    println!("{}", "Dry run: nothing will be fetched or written".yellow().bold());
    println!("   • Stations: {}", inventory.len());
    println!("   • Series cache: {}", config.series_cache_path.display());
    println!(
        "   • Source: data type {}, consistency {}",
        config.data_type, config.consistency
    );
    println!("   • Output: {}", config.output_path.display());
    println!("   • Ledger: {}", config.ledger_path.display());
    for station in inventory.stations() {
        println!("     {} {} ({})", station.code, station.name, station.state);
    }
}

fn print_summary(outcome: &BatchOutcome, config: &ProcessingConfig, written: &[PathBuf]) {
    let stats = &outcome.stats;

    println!();
    println!("{}", "Batch complete".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   • Stations attempted: {}", stats.attempted);
    println!(
        "   • With data: {} ({:.1}%)",
        stats.ok.to_string().green(),
        stats.success_rate()
    );
    println!(
        "   • No data: {} ({} empty, {} insufficient, {} failed fetches)",
        stats.no_data.to_string().yellow(),
        stats.empty_series,
        stats.insufficient_records,
        stats.transport_failures
    );
    println!(
        "   • Matrix: {} days x {} stations",
        outcome.results.matrix.height(),
        outcome.results.matrix.width()
    );
    println!(
        "   • Processing time: {} ({:.1} stations/s)",
        HumanDuration(stats.processing_time),
        stats.stations_per_second()
    );
    println!("   • Ledger: {}", config.ledger_path.display());
    println!(
        "   • Tables written: {} under {}",
        written.len(),
        config.output_path.display()
    );
    println!();
}
