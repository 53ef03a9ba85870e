//! Duty-free pricing CLI
//!
//! Prices a batch of purchase plans from a CSV file and prints the itemized
//! results as CSV on stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- quotes.csv > priced.csv
//! cargo run -- --strategy sync --rate 50.34 quotes.csv > priced.csv
//! cargo run -- --catalog stores.json --refund-schedule refunds.csv quotes.csv
//! cargo run -- --list-stores
//! ```
//!
//! Diagnostics go to stderr, filtered by `--log-level` / `DUTYFREE_LOG`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (bad reference data, input file not found or not readable, etc.)

use dutyfree_pricing::cli::{self, CliArgs};
use dutyfree_pricing::types::PricingError;
use dutyfree_pricing::{strategy, telemetry};
use std::process;
use std::sync::Arc;

fn run(args: &CliArgs) -> Result<(), PricingError> {
    let context = args.to_pricing_config().load()?;
    let mut output = std::io::stdout();

    if args.list_stores {
        return cli::write_store_listing(context.catalog(), &mut output);
    }

    let Some(input_file) = args.input_file.as_deref() else {
        // clap enforces INPUT unless --list-stores is given
        return Ok(());
    };

    let config = match args.strategy {
        cli::StrategyType::Async => Some(args.to_batch_config()),
        cli::StrategyType::Sync => None,
    };
    let strategy = strategy::create_strategy(args.strategy, config, Arc::new(context));

    strategy.process(input_file, &mut output)
}

fn main() {
    let args = cli::parse_args();

    if let Err(e) = telemetry::init(&args.to_telemetry_config()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
