//! Quote processing engine
//!
//! This module provides the QuoteEngine that orchestrates batch quoting by
//! coordinating the shared PricingContext with a QuoteLedger.
//!
//! The engine enforces the batch rules:
//! - Quote IDs are unique, the first occurrence wins
//! - Unknown stores and unknown promotions reject the quote
//! - A rejected quote never reaches the ledger

use crate::core::context::PricingContext;
use crate::core::ledger::QuoteLedger;
use crate::types::{PricingError, Quote, QuoteRecord};
use std::sync::Arc;
use tracing::debug;

/// Quote processing engine
///
/// Prices quote records one at a time and keeps the successful ones.
pub struct QuoteEngine {
    context: Arc<PricingContext>,
    ledger: QuoteLedger,
}

impl QuoteEngine {
    /// Create an engine with an empty ledger
    pub fn new(context: Arc<PricingContext>) -> Self {
        QuoteEngine {
            context,
            ledger: QuoteLedger::new(),
        }
    }

    /// Process a single quote record
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The quote ID was already processed
    /// - The store is not in the catalog
    /// - A selected promotion is not offered by the store
    pub fn process(&mut self, record: QuoteRecord) -> Result<(), PricingError> {
        // Check before pricing so a duplicate costs nothing
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

        self.ledger.insert(quote)
    }

    /// Get all priced quotes, sorted by quote ID
    pub fn get_quotes(&self) -> Vec<Quote> {
        self.ledger.get_all_quotes()
    }

    pub fn context(&self) -> &PricingContext {
        &self.context
    }
}
