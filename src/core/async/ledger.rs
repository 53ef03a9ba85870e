//! Thread-safe quote storage for async batch processing
//!
//! `AsyncQuoteLedger` is the concurrent counterpart of `QuoteLedger`. It uses
//! `DashMap` so workers pricing different quotes can record their results
//! without contending on a global lock.
//!
//! # Duplicate Handling
//!
//! Insertion goes through the entry API, so checking for an existing quote ID
//! and storing the new quote is one atomic step. When two workers race on the
//! same ID exactly one of them succeeds.

use crate::types::{PricingError, Quote, QuoteId};
use dashmap::DashMap;

/// Thread-safe ledger of priced quotes
#[derive(Debug, Default)]
pub struct AsyncQuoteLedger {
    /// Priced quotes by quote ID
    quotes: DashMap<QuoteId, Quote>,
}

impl AsyncQuoteLedger {
    pub fn new() -> Self {
        Self {
            quotes: DashMap::new(),
        }
    }

    pub fn contains(&self, id: QuoteId) -> bool {
        self.quotes.contains_key(&id)
    }

    /// Record a priced quote (thread-safe)
    ///
    /// # Errors
    ///
    /// Returns `DuplicateQuote` if another quote with the same ID was recorded
    /// first. The stored quote is left untouched.
    pub fn insert(&self, quote: Quote) -> Result<(), PricingError> {
        let id = quote.id;
        let mut inserted = false;

        self.quotes.entry(id).or_insert_with(|| {
            inserted = true;
            quote
        });

        if inserted {
            Ok(())
        } else {
            Err(PricingError::duplicate_quote(id))
        }
    }

    /// Get a copy of a recorded quote
    ///
    /// The quote is cloned so no shard lock outlives the call.
    pub fn get(&self, id: QuoteId) -> Option<Quote> {
        self.quotes.get(&id).map(|entry| entry.value().clone())
    }

    /// Snapshot of all recorded quotes, sorted by quote ID
    pub fn get_all_quotes(&self) -> Vec<Quote> {
        let mut quotes: Vec<Quote> = self
            .quotes
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        quotes.sort_by_key(|quote| quote.id);
        quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
