//! Asynchronous batch processing strategy
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (quote partitioning + tokio tasks)
//!     └── AsyncQuoteEngine
//!         ├── Arc<PricingContext> (read-only reference data)
//!         └── Arc<AsyncQuoteLedger> (thread-safe priced quotes)
//! ```
//!
//! Batches are read and processed one after another; the quotes inside a
//! batch are priced in parallel on a multi-threaded tokio runtime. A quote ID
//! reused in a later batch is therefore always seen after the first one, and
//! the output matches the synchronous strategy.

use crate::core::r#async::{AsyncQuoteEngine, AsyncQuoteLedger, BatchProcessor};
use crate::core::PricingContext;
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_quotes_csv;
use crate::strategy::ProcessingStrategy;
use crate::types::PricingError;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Batch sizing and worker count for the async strategy
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Records read per batch
    pub batch_size: usize,

    /// Runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a config, replacing zero values with the defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "invalid worker count, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    context: Arc<PricingContext>,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig, context: Arc<PricingContext>) -> Self {
        Self { config, context }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), PricingError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()?;

        runtime.block_on(async {
            let ledger = Arc::new(AsyncQuoteLedger::new());
            let engine = Arc::new(AsyncQuoteEngine::new(
                Arc::clone(&self.context),
                Arc::clone(&ledger),
            ));
            let processor = BatchProcessor::new(engine);

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| match e.kind() {
                    ErrorKind::NotFound => {
                        PricingError::file_not_found(&input_path.display().to_string())
                    }
                    _ => PricingError::from(e),
                })?;

            // csv-async reads futures::io, tokio files need the compat layer
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut rejected = 0usize;
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                // Wait for the batch before reading on, so reused IDs resolve in input order
                let results = processor.process_batch(batch).await;
                rejected += results.iter().filter(|r| r.result.is_err()).count();
            }

            let quotes = ledger.get_all_quotes();
            info!(priced = quotes.len(), rejected, "batch complete");

            write_quotes_csv(&quotes, output)
        })
    }
}
