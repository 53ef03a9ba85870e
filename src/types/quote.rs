//! Quote request and outcome types
//!
//! A quote asks for the net cost of one basket at one store with a chosen set
//! of that store's promotions. Quotes are the unit of work for the batch front
//! end; the pricing pipeline itself knows nothing about them.

use super::pricing::PricingResult;
use rust_decimal::Decimal;

/// Quote identifier
pub type QuoteId = u32;

/// A single pricing request as read from input
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRecord {
    /// Unique quote identifier
    pub id: QuoteId,

    /// Store whose catalog entry the discounts are taken from
    pub store: String,

    /// Basket total in won before any promotion
    pub gross: Decimal,

    /// Names of the selected promotions, in evaluation order
    pub discounts: Vec<String>,

    /// Domestic reference price of the same basket, in yuan
    pub domestic_cny: Option<Decimal>,
}

/// Priced quote
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub id: QuoteId,
    pub store: String,
    pub pricing: PricingResult,

    /// Final payment converted to yuan, absent when no exchange rate is known
    pub final_cny: Option<i64>,

    /// Final yuan cost as a whole percentage of the domestic reference price
    pub domestic_ratio: Option<i64>,
}
