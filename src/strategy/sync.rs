//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates quoting by coordinating between
//! the SyncReader (for CSV input) and QuoteEngine (for pricing).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Pricing to `QuoteEngine`
//! - CSV output to `csv_format::write_quotes_csv`
//!
//! Records are streamed one at a time; only priced quotes are kept in memory.

use crate::core::{PricingContext, QuoteEngine};
use crate::io::csv_format::write_quotes_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::PricingError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct SyncProcessingStrategy {
    context: Arc<PricingContext>,
}

impl SyncProcessingStrategy {
    pub fn new(context: Arc<PricingContext>) -> Self {
        Self { context }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), PricingError> {
        let mut engine = QuoteEngine::new(Arc::clone(&self.context));
        let mut reader = SyncReader::new(input_path)?;
        let mut rejected = 0usize;

        // Per-record errors are logged and skipped
        while let Some(result) = reader.next() {
            let outcome = result.and_then(|record| engine.process(record));
            if let Err(e) = outcome {
                rejected += 1;
                warn!(line = reader.line(), error = %e, "quote rejected");
            }
        }

        let quotes = engine.get_quotes();
        info!(priced = quotes.len(), rejected, "batch complete");

        write_quotes_csv(&quotes, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::fixtures::test_context;
    use crate::core::ExchangeRate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn strategy() -> SyncProcessingStrategy {
        SyncProcessingStrategy::new(Arc::new(test_context(ExchangeRate::parse("50"))))
    }

    fn run(content: &str) -> Vec<String> {
        let file = create_temp_csv(content);
        let mut output = Vec::new();
        strategy().process(file.path(), &mut output).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_sync_strategy_prices_quote() {
        let lines = run("id,store,gross,discounts,domestic_cny\n\
                         1,Harbor,1000000,Member 5%|Voucher,6000\n");

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "1,Harbor,1000000,50000,950000,65000,885000,20000,0,865000,4325,72,,Member 5%|Voucher"
        );
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let mut output = Vec::new();
        let result = strategy().process(Path::new("nonexistent.csv"), &mut output);
        assert!(matches!(result, Err(PricingError::FileNotFound { .. })));
    }

    #[test]
    fn test_sync_strategy_continues_on_bad_records() {
        let lines = run("id,store,gross,discounts,domestic_cny\n\
                         1,Outlet,100000,,\n\
                         2,Outlet,oops,,\n\
                         3,Nowhere,100000,,\n\
                         4,Outlet,100000,Member 5%,\n\
                         1,Outlet,999999,,\n\
                         5,Outlet,100000,,\n");

        let ids: Vec<&str> = lines[1..]
            .iter()
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "5"]);
        assert!(lines[1].starts_with("1,Outlet,100000,"));
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }
}
