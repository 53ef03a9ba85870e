//! Shared reference data for pricing quotes
//!
//! A `PricingContext` bundles everything loaded once at startup: the discount
//! catalog, the refund schedule and the optional exchange rate. All of it is
//! read-only, so one context is cloned cheaply (via `Arc`) into every worker.

use crate::core::catalog::{select_rules, DiscountCatalog};
use crate::core::currency::{domestic_ratio, ExchangeRate};
use crate::core::pipeline::PricingPipeline;
use crate::core::refund_schedule::TaxRefundSchedule;
use crate::types::{PricingError, Quote, QuoteRecord};
use std::sync::Arc;

/// Immutable pricing inputs shared by all quote engines
#[derive(Debug, Clone)]
pub struct PricingContext {
    catalog: Arc<DiscountCatalog>,
    schedule: Arc<TaxRefundSchedule>,
    rate: Option<ExchangeRate>,
}

impl PricingContext {
    pub fn new(
        catalog: DiscountCatalog,
        schedule: TaxRefundSchedule,
        rate: Option<ExchangeRate>,
    ) -> Self {
        PricingContext {
            catalog: Arc::new(catalog),
            schedule: Arc::new(schedule),
            rate,
        }
    }

    pub fn catalog(&self) -> &DiscountCatalog {
        &self.catalog
    }

    pub fn schedule(&self) -> &TaxRefundSchedule {
        &self.schedule
    }

    pub fn rate(&self) -> Option<ExchangeRate> {
        self.rate
    }

    /// Price one quote request
    ///
    /// Resolves the store and the selected promotions, runs the pricing
    /// pipeline and derives the yuan figures when a rate is available.
    ///
    /// # Errors
    ///
    /// - `StoreNotFound` if the store is not in the catalog
    /// - `DiscountNotFound` if a selected promotion is not offered by the store
    pub fn price(&self, record: &QuoteRecord) -> Result<Quote, PricingError> {
        let rules = select_rules(self.catalog.as_ref(), &record.store, &record.discounts)?;
        let pricing = PricingPipeline::new(&self.schedule).compute(record.gross, rules);

        let final_cny = self
            .rate
            .and_then(|rate| rate.to_yuan(pricing.final_payment));
        let domestic_ratio =
            final_cny.and_then(|cny| domestic_ratio(cny, record.domestic_cny));

        Ok(Quote {
            id: record.id,
            store: record.store.clone(),
            pricing,
            final_cny,
            domestic_ratio,
        })
    }
}
