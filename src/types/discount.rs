//! Discount rule schema
//!
//! Store promotions are authored as data. Each rule carries a display name and a
//! closed [`RuleKind`] which decides the pipeline stage it belongs to and the
//! fields needed to evaluate it. The serde representation is the catalog's JSON
//! shape: the kind tag lives in a `type` field next to the rule's own fields.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One bracket of a tiered promotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Minimum evaluation amount (inclusive) for this bracket
    pub threshold: Decimal,

    /// Payout when this bracket is the highest one reached
    pub amount: Decimal,
}

impl Tier {
    pub fn new(threshold: Decimal, amount: Decimal) -> Self {
        Tier { threshold, amount }
    }
}

/// Select the highest tier whose threshold does not exceed `amount`
///
/// Exactly one tier is picked, payouts are never summed across brackets.
/// Selection compares thresholds only, so the storage order of `tiers` has no
/// influence on the outcome.
pub fn select_tier(tiers: &[Tier], amount: Decimal) -> Option<&Tier> {
    tiers
        .iter()
        .filter(|tier| tier.threshold <= amount)
        .max_by_key(|tier| tier.threshold)
}

/// Stage of the pricing pipeline a rule takes effect in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStage {
    /// Reduces the price before the tax refund is looked up
    PreTax,

    /// Voucher or points reward applied after the tax refund
    PostTax,
}

/// The closed set of promotion kinds
///
/// Legacy tags from older catalog files are accepted as aliases. Any other tag
/// deserializes to [`RuleKind::Unrecognized`] so one malformed entry does not make
/// the whole catalog unusable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleKind {
    /// `rate` × gross, no threshold
    #[serde(alias = "pre_tax_percent")]
    PercentOfGross { rate: Decimal },

    /// Flat `amount` off once gross reaches `threshold`
    #[serde(alias = "pre_tax_fixed")]
    FixedAboveThreshold { threshold: Decimal, amount: Decimal },

    /// `rate` × gross, at most `cap`, once gross reaches `threshold`
    #[serde(alias = "pre_tax_capped")]
    CappedPercentAboveThreshold {
        threshold: Decimal,
        rate: Decimal,
        cap: Decimal,
    },

    /// Instant cut chosen from brackets of the gross amount
    #[serde(alias = "pre_tax_tiered")]
    TieredCut { tiers: Vec<Tier> },

    /// Gift voucher chosen from brackets of the post-discount amount
    #[serde(alias = "post_tax_tiered")]
    TieredVoucher { tiers: Vec<Tier> },

    /// Loyalty points chosen from brackets of the post-discount amount
    #[serde(alias = "post_tax_tiered_points")]
    TieredPoints { tiers: Vec<Tier> },

    /// A tag this build does not know how to evaluate
    #[serde(other)]
    Unrecognized,
}

impl RuleKind {
    /// Pipeline stage of this kind, `None` for unrecognized rules
    pub fn stage(&self) -> Option<RuleStage> {
        match self {
            RuleKind::PercentOfGross { .. }
            | RuleKind::FixedAboveThreshold { .. }
            | RuleKind::CappedPercentAboveThreshold { .. }
            | RuleKind::TieredCut { .. } => Some(RuleStage::PreTax),
            RuleKind::TieredVoucher { .. } | RuleKind::TieredPoints { .. } => {
                Some(RuleStage::PostTax)
            }
            RuleKind::Unrecognized => None,
        }
    }

    /// Tiers of a tiered kind, empty for the others
    pub fn tiers(&self) -> &[Tier] {
        match self {
            RuleKind::TieredCut { tiers }
            | RuleKind::TieredVoucher { tiers }
            | RuleKind::TieredPoints { tiers } => tiers,
            _ => &[],
        }
    }

    /// Sort tiers into ascending threshold order
    pub fn normalize(&mut self) {
        if let RuleKind::TieredCut { tiers }
        | RuleKind::TieredVoucher { tiers }
        | RuleKind::TieredPoints { tiers } = self
        {
            tiers.sort_by_key(|tier| tier.threshold);
        }
    }
}

/// A single promotional offer as authored in a store's catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRule {
    /// Display label, unique within a store
    pub name: String,

    #[serde(flatten)]
    pub kind: RuleKind,

    /// Conditions shown to the shopper (card network, membership, ...)
    #[serde(default, alias = "rule", skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,

    /// The offer may be redeemed once per shopper
    #[serde(default)]
    pub once_only: bool,
}

impl DiscountRule {
    pub fn new(name: impl Into<String>, kind: RuleKind) -> Self {
        DiscountRule {
            name: name.into(),
            kind,
            terms: None,
            once_only: false,
        }
    }

    pub fn stage(&self) -> Option<RuleStage> {
        self.kind.stage()
    }
}
