//! Core business logic module
//!
//! - `traits` - Trait abstractions over the promotion catalog
//! - `catalog` - Store promotions and rule selection
//! - `refund_schedule` - Tax refund brackets and lookup
//! - `pipeline` - The staged pricing calculation
//! - `currency` - Won to yuan display conversion
//! - `context` - Reference data shared by all engines
//! - `engine` / `ledger` - Sequential batch quoting
//! - `async` - Concurrent batch quoting

pub mod r#async;
pub mod catalog;
pub mod context;
pub mod currency;
pub mod engine;
pub mod ledger;
pub mod pipeline;
pub mod refund_schedule;
pub mod traits;

pub use catalog::{select_rules, DiscountCatalog, StorePromotions};
pub use context::PricingContext;
pub use currency::{domestic_ratio, ExchangeRate};
pub use engine::QuoteEngine;
pub use ledger::QuoteLedger;
pub use pipeline::PricingPipeline;
pub use r#async::{AsyncQuoteEngine, AsyncQuoteLedger, BatchProcessor};
pub use refund_schedule::{RefundBracket, RefundOverflow, TaxRefundSchedule};
pub use traits::CatalogSource;
