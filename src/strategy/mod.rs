//! Processing strategy module for batch quoting
//!
//! This module defines the Strategy pattern for complete quoting pipelines,
//! encompassing both CSV parsing and quote pricing. This allows different
//! processing implementations (synchronous, asynchronous batch) to be selected
//! at runtime. Both produce identical output for the same input.

use crate::cli::StrategyType;
use crate::core::PricingContext;
use crate::types::PricingError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// A complete input-to-output quoting pipeline
pub trait ProcessingStrategy: Send + Sync {
    /// Price every quote in `input_path` and write the priced CSV to `output`
    ///
    /// Per-record problems are logged and skipped. Only failures that stop the
    /// whole run (unreadable input, failed output) are returned.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), PricingError>;
}

pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
    context: Arc<PricingContext>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(context)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, context))
        }
    }
}
