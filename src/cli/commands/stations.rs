//! Stations command: list the stations of an inventory

use super::shared::tally;
use crate::app::services::station_inventory::StationInventory;
use crate::cli::args::StationsArgs;
use crate::Result;
use colored::*;
use tracing::debug;

pub async fn run_stations(args: StationsArgs) -> Result<()> {
    debug!("Stations arguments: {:?}", args);

    let (inventory, load_stats) = StationInventory::load(&args.inventory_path).await?;

    let stations = match &args.state {
        Some(state) => inventory.filter_by_state(state),
        None => inventory.stations().iter().collect(),
    };

    println!("{}", load_stats.summary().bold());
    for station in &stations {
        println!(
            "{:>10}  {:<40}  {:>9.4} {:>9.4}  {}",
            station.code, station.name, station.latitude, station.longitude, station.state
        );
    }

    println!();
    for (state, count) in tally(stations.iter().map(|s| s.state.as_str())) {
        let label = if state.is_empty() { "(no state)" } else { state };
        println!("   • {}: {}", label, count);
    }
    Ok(())
}
