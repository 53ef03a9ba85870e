//! Duty-free pricing engine
//!
//! # Overview
//!
//! Computes the effective net cost of a duty-free basket at a Korean store:
//! store promotions, the government tax refund and post-purchase rewards,
//! with an optional yuan conversion for display. Batches of quotes are read
//! from CSV and priced with either a sync or an async strategy.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (rules, tiers, pricing results, quotes, errors)
//! - [`core`] - Business logic:
//!   - [`core::catalog`] - Per-store promotion catalog
//!   - [`core::refund_schedule`] - Tax refund brackets
//!   - [`core::pipeline`] - The staged pricing calculation
//!   - [`core::engine`] and `core::async` - Batch quoting, sequential and concurrent
//! - [`io`] - CSV input/output and reference data loading
//! - [`strategy`] - Pluggable processing strategies
//! - [`config`] / [`telemetry`] - Runtime configuration and logging
//! - [`cli`] - CLI arguments parsing
//!
//! # Pricing Stages
//!
//! 1. Pre-tax discounts, each computed from the gross amount and summed
//! 2. Post-discount amount, never below zero
//! 3. Voucher and points tiers on the post-discount amount
//! 4. Tax refund looked up on the post-discount amount
//! 5. After-tax amount
//! 6. Final payment after vouchers and points
//!
//! ```
//! use dutyfree_pricing::core::{PricingPipeline, RefundOverflow, TaxRefundSchedule};
//! use dutyfree_pricing::types::{DiscountRule, RuleKind};
//! use rust_decimal::Decimal;
//!
//! let schedule = TaxRefundSchedule::from_thresholds(
//!     &[(Decimal::from(15_000), Decimal::from(1_000))],
//!     RefundOverflow::ClampToLast,
//! )
//! .unwrap();
//! let member = DiscountRule::new("Member 5%", RuleKind::PercentOfGross { rate: Decimal::new(5, 2) });
//!
//! let result = PricingPipeline::new(&schedule).compute(Decimal::from(100_000), [&member]);
//! assert_eq!(result.final_payment, Decimal::from(94_000));
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod strategy;
pub mod telemetry;
pub mod types;

pub use config::{PricingConfig, TelemetryConfig};
pub use core::{
    DiscountCatalog, PricingContext, PricingPipeline, QuoteEngine, RefundOverflow,
    TaxRefundSchedule,
};
pub use io::write_quotes_csv;
pub use types::{
    DiscountRule, PricingAnomaly, PricingError, PricingResult, Quote, QuoteId, QuoteRecord,
    RuleKind, Tier,
};
