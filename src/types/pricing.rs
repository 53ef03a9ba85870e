//! Itemized pricing output
//!
//! A [`PricingResult`] is produced once per pipeline run and never mutated
//! afterwards. Every intermediate stage amount is kept so the display layer can
//! show the whole calculation, not just the final figure.

use rust_decimal::Decimal;
use serde::Serialize;

/// Data-quality findings raised while pricing
///
/// Anomalies never abort a calculation; they travel with the result so callers
/// can decide whether to trust it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingAnomaly {
    /// A selected rule had a kind this build cannot evaluate, it was skipped
    UnrecognizedRule { name: String },

    /// Pre-tax discounts added up to more than the gross amount
    ///
    /// The post-discount amount was clamped to zero before the refund and bonus
    /// stages ran.
    DiscountExceedsGross { pre_tax_discount: Decimal },
}

impl PricingAnomaly {
    /// Short machine-readable code used in CSV output
    pub fn code(&self) -> &'static str {
        match self {
            PricingAnomaly::UnrecognizedRule { .. } => "unrecognized_rule",
            PricingAnomaly::DiscountExceedsGross { .. } => "discount_exceeds_gross",
        }
    }
}

/// Fully itemized result of one pricing calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingResult {
    /// Price before any promotion
    pub gross: Decimal,

    /// Sum of all pre-tax rule contributions, each taken off the gross amount
    pub pre_tax_discount: Decimal,

    /// `gross - pre_tax_discount`, never negative
    pub after_pre_tax: Decimal,

    /// Refund looked up from the schedule on `after_pre_tax`
    pub tax_refund: Decimal,

    /// `after_pre_tax - tax_refund`
    pub after_tax: Decimal,

    /// Gift voucher value, from the last voucher rule evaluated
    pub voucher: Decimal,

    /// Loyalty points value, from the last points rule evaluated
    pub points: Decimal,

    /// Effective net cost: `after_tax - voucher - points`
    pub final_payment: Decimal,

    /// Names of the rules that were evaluated, in selection order
    pub applied_rules: Vec<String>,

    pub anomalies: Vec<PricingAnomaly>,
}

impl PricingResult {
    /// Whether any data-quality anomaly was raised
    pub fn is_anomalous(&self) -> bool {
        !self.anomalies.is_empty()
    }
}
