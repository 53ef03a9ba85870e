use crate::config::{PricingConfig, TelemetryConfig, DEFAULT_LOG_LEVEL};
use crate::core::RefundOverflow;
use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Price duty-free purchase plans across stores
#[derive(Parser, Debug)]
#[command(name = "dutyfree-pricer")]
#[command(
    about = "Price duty-free purchase plans: promotions, tax refund and rewards per store",
    long_about = None
)]
pub struct CliArgs {
    /// Input CSV file path containing quote requests
    #[arg(
        value_name = "INPUT",
        required_unless_present = "list_stores",
        help = "Path to the input CSV file (id,store,gross,discounts,domestic_cny)"
    )]
    pub input_file: Option<PathBuf>,

    /// Processing strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of quotes per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of quotes per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of worker threads (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    #[arg(
        long = "catalog",
        value_name = "PATH",
        help = "Discount catalog JSON (default: bundled catalog)"
    )]
    pub catalog: Option<PathBuf>,

    #[arg(
        long = "refund-schedule",
        value_name = "PATH",
        help = "Refund schedule CSV with lower,upper,refund columns (default: bundled schedule)"
    )]
    pub refund_schedule: Option<PathBuf>,

    #[arg(
        long = "refund-overflow",
        value_name = "POLICY",
        default_value = "clamp",
        help = "Refund above a closed schedule: 'clamp' to the top bracket or 'zero'"
    )]
    pub refund_overflow: RefundOverflow,

    #[arg(
        long = "rate",
        value_name = "RATE",
        env = "DUTYFREE_RATE",
        help = "Yuan per 10000 won, as a number or a '10000韩元=50.34人民币' notice"
    )]
    pub rate: Option<String>,

    #[arg(
        long = "log-level",
        value_name = "FILTER",
        env = "DUTYFREE_LOG",
        default_value = DEFAULT_LOG_LEVEL,
        help = "Log level or filter directive for stderr diagnostics"
    )]
    pub log_level: String,

    #[arg(
        long = "list-stores",
        help = "Print the catalog's stores and promotions, then exit"
    )]
    pub list_stores: bool,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values take the defaults; zero values are replaced with the
    /// defaults and a warning is logged.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    pub fn to_pricing_config(&self) -> PricingConfig {
        PricingConfig {
            catalog: self.catalog.clone(),
            refund_schedule: self.refund_schedule.clone(),
            refund_overflow: self.refund_overflow,
            rate: self.rate.clone(),
        }
    }

    pub fn to_telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig {
            log_level: self.log_level.clone(),
        }
    }
}
