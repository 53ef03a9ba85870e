// CLI module
// Command-line interface, argument parsing and the catalog listing

mod args;
mod listing;

pub use args::{CliArgs, StrategyType};
pub use listing::write_store_listing;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// On invalid arguments or `--help`, clap prints the message and exits.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
