//! Priced quote storage
//!
//! This module provides the `QuoteLedger` that keeps every successfully priced
//! quote of a batch, keyed by quote ID, so the batch can be reported once all
//! input has been consumed.
//!
//! # Duplicate Handling
//!
//! Quote IDs are unique within a batch. The first quote with a given ID is
//! kept and any later quote reusing the ID is rejected with `DuplicateQuote`.

use crate::types::{PricingError, Quote, QuoteId};
use std::collections::HashMap;

/// Ledger of priced quotes
///
/// Maintains a HashMap of quote ID to priced quote.
#[derive(Debug, Default)]
pub struct QuoteLedger {
    quotes: HashMap<QuoteId, Quote>,
}

impl QuoteLedger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        QuoteLedger {
            quotes: HashMap::new(),
        }
    }

    /// Check whether a quote ID has already been recorded
    pub fn contains(&self, id: QuoteId) -> bool {
        self.quotes.contains_key(&id)
    }

    /// Record a priced quote
    ///
    /// # Errors
    ///
    /// Returns `DuplicateQuote` if the ID is already recorded. The stored quote
    /// is left untouched.
    pub fn insert(&mut self, quote: Quote) -> Result<(), PricingError> {
        if self.quotes.contains_key(&quote.id) {
            return Err(PricingError::duplicate_quote(quote.id));
        }
        self.quotes.insert(quote.id, quote);
        Ok(())
    }

    pub fn get(&self, id: QuoteId) -> Option<&Quote> {
        self.quotes.get(&id)
    }

    /// All recorded quotes, sorted by quote ID for deterministic output
    pub fn get_all_quotes(&self) -> Vec<Quote> {
        let mut quotes: Vec<Quote> = self.quotes.values().cloned().collect();
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
