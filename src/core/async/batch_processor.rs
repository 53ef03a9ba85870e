//! Batch processing with quote-based partitioning
//!
//! This module provides the `BatchProcessor` struct, which prices a batch of
//! quote records concurrently.
//!
//! # Design
//!
//! Records are partitioned by quote ID. Quotes with different IDs share no
//! mutable state, so every partition runs as its own tokio task. Records that
//! reuse an ID land in the same partition and are processed in input order,
//! which keeps "first occurrence wins" deterministic.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── Arc<AsyncQuoteEngine>  (shared quote processor)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, warn};

use super::AsyncQuoteEngine;
use crate::types::{PricingError, QuoteId, QuoteRecord};

/// Result of processing a single quote record
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The quote record that was processed
    pub record: QuoteRecord,

    /// The result of processing (success or error)
    pub result: Result<(), PricingError>,
}

/// Batch processor with quote-based partitioning
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    engine: Arc<AsyncQuoteEngine>,
}

impl BatchProcessor {
    pub fn new(engine: Arc<AsyncQuoteEngine>) -> Self {
        Self { engine }
    }

    /// Partition a batch by quote ID
    ///
    /// Input order is preserved within each partition.
    pub fn partition_by_quote(
        &self,
        batch: Vec<QuoteRecord>,
    ) -> HashMap<QuoteId, Vec<QuoteRecord>> {
        let mut partitions: HashMap<QuoteId, Vec<QuoteRecord>> = HashMap::new();

        for record in batch {
            partitions.entry(record.id).or_default().push(record);
        }

        partitions
    }

    /// Process one partition sequentially
    ///
    /// A failing record does not stop the records after it.
    pub async fn process_partition(&self, records: Vec<QuoteRecord>) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(records.len());

        for record in records {
            let result = self.engine.process_quote(record.clone());
            if let Err(err) = &result {
                warn!(quote = record.id, error = %err, "quote rejected");
            }
            results.push(ProcessingResult { record, result });
        }

        results
    }

    /// Process a batch, one tokio task per partition
    ///
    /// Returns once every task has finished. The results are in no particular
    /// order across partitions.
    pub async fn process_batch(&self, batch: Vec<QuoteRecord>) -> Vec<ProcessingResult> {
        let partitions = self.partition_by_quote(batch);

        let mut tasks = Vec::with_capacity(partitions.len());
        for (_quote_id, records) in partitions {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_partition(records).await
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(partition_results) => results.extend(partition_results),
                Err(err) => error!(error = %err, "quote task panicked"),
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::fixtures::{quote, test_context};
    use crate::core::r#async::AsyncQuoteLedger;
    use rust_decimal::Decimal;

    fn processor() -> (BatchProcessor, Arc<AsyncQuoteLedger>) {
        let ledger = Arc::new(AsyncQuoteLedger::new());
        let engine = AsyncQuoteEngine::new(Arc::new(test_context(None)), Arc::clone(&ledger));
        (BatchProcessor::new(Arc::new(engine)), ledger)
    }

    #[test]
    fn test_partition_by_quote_empty_batch() {
        let (processor, _) = processor();
        assert!(processor.partition_by_quote(vec![]).is_empty());
    }

    #[test]
    fn test_partition_by_quote_groups_reused_ids_in_order() {
        let (processor, _) = processor();
        let batch = vec![
            quote(1, "Outlet", 10_000, &[]),
            quote(2, "Outlet", 20_000, &[]),
            quote(1, "Harbor", 30_000, &[]),
        ];

        let partitions = processor.partition_by_quote(batch);

        assert_eq!(partitions.len(), 2);
        let stores: Vec<&str> = partitions[&1].iter().map(|r| r.store.as_str()).collect();
        assert_eq!(stores, vec!["Outlet", "Harbor"]);
        assert_eq!(partitions[&2].len(), 1);
    }

    #[test]
    fn test_partition_by_quote_no_records_lost() {
        let (processor, _) = processor();
        let batch: Vec<QuoteRecord> = (0..50)
            .map(|i| quote(i % 7, "Outlet", 10_000, &[]))
            .collect();

        let partitions = processor.partition_by_quote(batch);

        assert_eq!(partitions.len(), 7);
        assert_eq!(partitions.values().map(Vec::len).sum::<usize>(), 50);
    }

    #[tokio::test]
    async fn test_process_partition_continues_after_error() {
        let (processor, ledger) = processor();
        let records = vec![
            quote(1, "Nowhere", 10_000, &[]),
            quote(1, "Outlet", 10_000, &[]),
            quote(1, "Outlet", 99_000, &[]),
        ];

        let results = processor.process_partition(records).await;

        assert_eq!(results.len(), 3);
        assert!(matches!(
            results[0].result,
            Err(PricingError::StoreNotFound { .. })
        ));
        assert!(results[1].result.is_ok());
        assert!(matches!(
            results[2].result,
            Err(PricingError::DuplicateQuote { quote: 1 })
        ));
        assert_eq!(
            ledger.get(1).map(|quote| quote.pricing.gross),
            Some(Decimal::from(10_000))
        );
    }

    #[tokio::test]
    async fn test_process_batch_empty() {
        let (processor, ledger) = processor();
        assert!(processor.process_batch(vec![]).await.is_empty());
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_process_batch_prices_every_quote() {
        let (processor, ledger) = processor();
        let batch: Vec<QuoteRecord> = (1..=20)
            .map(|id| quote(id, "Harbor", 500_000, &["Member 5%"]))
            .collect();

        let results = processor.process_batch(batch).await;

        assert_eq!(results.len(), 20);
        assert!(results.iter().all(|r| r.result.is_ok()));
        let quotes = ledger.get_all_quotes();
        assert_eq!(quotes.len(), 20);
        // 475,000 after 5%, refund 1,000 below the 500,000 bracket
        assert!(quotes
            .iter()
            .all(|quote| quote.pricing.final_payment == Decimal::from(474_000)));
    }

    #[tokio::test]
    async fn test_process_batch_reports_errors() {
        let (processor, ledger) = processor();
        let batch = vec![
            quote(1, "Outlet", 10_000, &[]),
            quote(2, "Outlet", 10_000, &["Voucher"]),
            quote(1, "Outlet", 50_000, &[]),
        ];

        let results = processor.process_batch(batch).await;

        let failures = results.iter().filter(|r| r.result.is_err()).count();
        assert_eq!(failures, 2);
        assert_eq!(ledger.len(), 1);
        assert_eq!(
            ledger.get(1).map(|quote| quote.pricing.gross),
            Some(Decimal::from(10_000))
        );
    }
}
