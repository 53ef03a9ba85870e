//! Quote processing orchestration for async batch processing
//!
//! # Architecture
//!
//! ```text
//! AsyncQuoteEngine
//!     ├── Arc<PricingContext>   (read-only catalog, schedule and rate)
//!     └── Arc<AsyncQuoteLedger> (thread-safe priced quotes)
//! ```
//!
//! The engine is cheap to clone and every clone shares the same ledger, so it
//! can be handed to as many tasks as needed.

use std::sync::Arc;

use tracing::debug;

use super::AsyncQuoteLedger;
use crate::core::context::PricingContext;
use crate::types::{PricingError, QuoteRecord};

/// Thread-safe quote processing engine
#[derive(Debug, Clone)]
pub struct AsyncQuoteEngine {
    context: Arc<PricingContext>,
    ledger: Arc<AsyncQuoteLedger>,
}

impl AsyncQuoteEngine {
    pub fn new(context: Arc<PricingContext>, ledger: Arc<AsyncQuoteLedger>) -> Self {
        Self { context, ledger }
    }

    /// Price a quote record and record it (thread-safe)
    ///
    /// Same rules as the synchronous engine: duplicates, unknown stores and
    /// unknown promotions are rejected and nothing is recorded for them.
    pub fn process_quote(&self, record: QuoteRecord) -> Result<(), PricingError> {
        if self.ledger.contains(record.id) {
            return Err(PricingError::duplicate_quote(record.id));
        }

        let quote = self.context.price(&record)?;
        debug!(
            quote = quote.id,
            store = %quote.store,
            final_payment = %quote.pricing.final_payment,
            anomalous = quote.pricing.is_anomalous(),
            "quote priced"
        );

        // The ledger settles races between workers holding the same ID
        self.ledger.insert(quote)
    }

    pub fn ledger(&self) -> &AsyncQuoteLedger {
        &self.ledger
    }
}
