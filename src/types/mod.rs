//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `discount`: Promotion rule schema and tier selection
//! - `pricing`: Itemized pipeline output and anomaly flags
//! - `quote`: Quote requests and priced quotes
//! - `error`: Error types for the pricing engine

pub mod discount;
pub mod error;
pub mod pricing;
pub mod quote;

pub use discount::{select_tier, DiscountRule, RuleKind, RuleStage, Tier};
pub use error::PricingError;
pub use pricing::{PricingAnomaly, PricingResult};
pub use quote::{Quote, QuoteId, QuoteRecord};
