use anyhow::Context;
use clap::Parser;
use hidro_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    if let Err(error) = run(args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
    runtime.block_on(commands::run(args))?;
    Ok(())
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Hidro Processor - Rain-gauge series completeness and statistics");
    println!("================================================================");
    println!();
    println!("Fetch the daily series of every station in an inventory, compute");
    println!("completeness indices and statistics, and write combined tables.");
    println!();
    println!("USAGE:");
    println!("    hidro-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Run a batch over a station inventory (main command)");
    println!("    stations    List the stations of an inventory");
    println!("    ledger      Summarize an existing processing ledger");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Process an inventory against the default series cache:");
    println!("    hidro-processor process --inventory stations.csv");
    println!();
    println!("    # Restrict the window and use the corrected yearly ratios:");
    println!("    hidro-processor process -i stations.csv --start 1980-01-01 --end 2010-12-31 \\");
    println!("                            --year-ratio corrected --format parquet");
    println!();
    println!("    # Check which stations produced data in the last run:");
    println!("    hidro-processor ledger --ledger output/history.csv --successful");
    println!();
    println!("For detailed help on any command, use:");
    println!("    hidro-processor <COMMAND> --help");
}
