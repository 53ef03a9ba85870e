//! Pricing pipeline
//!
//! Turns a gross amount and a shopper's selected promotions into an itemized
//! [`PricingResult`]. The stage order is fixed:
//!
//! 1. Pre-tax discounts, each computed against the gross amount and summed
//! 2. `after_pre_tax = gross - pre_tax_discount`, clamped at zero
//! 3. Voucher and points tiers, evaluated against `after_pre_tax`
//! 4. Tax refund looked up on `after_pre_tax`
//! 5. `after_tax = after_pre_tax - tax_refund`
//! 6. `final_payment = after_tax - voucher - points`
//!
//! The pipeline holds no state besides a borrowed refund schedule, performs no
//! I/O and never fails. Concurrent callers can share one instance freely.

use crate::core::refund_schedule::TaxRefundSchedule;
use crate::types::{
    select_tier, DiscountRule, PricingAnomaly, PricingResult, RuleKind, RuleStage, Tier,
};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Stateless pricing calculator bound to one refund schedule
#[derive(Debug, Clone, Copy)]
pub struct PricingPipeline<'s> {
    schedule: &'s TaxRefundSchedule,
}

impl<'s> PricingPipeline<'s> {
    pub fn new(schedule: &'s TaxRefundSchedule) -> Self {
        PricingPipeline { schedule }
    }

    /// Refund for a spend amount, for what-if displays
    pub fn lookup(&self, amount: Decimal) -> Decimal {
        self.schedule.lookup(amount)
    }

    /// Price a basket with the selected promotions
    ///
    /// Rules are evaluated in the order given. Pre-tax rules all use `gross` as
    /// their base, so overlapping percentage and fixed cuts add up instead of
    /// compounding. For post-tax rules the last voucher rule and the last points
    /// rule evaluated decide the respective reward; rewards of the same kind are
    /// never summed.
    ///
    /// Unrecognized rules are skipped and flagged. Pre-tax discounts larger than
    /// `gross` clamp the post-discount amount to zero and flag the result.
    pub fn compute<'r, I>(&self, gross: Decimal, selected: I) -> PricingResult
    where
        I: IntoIterator<Item = &'r DiscountRule>,
    {
        let rules: Vec<&DiscountRule> = selected.into_iter().collect();
        let mut anomalies = Vec::new();
        let mut applied_rules = Vec::with_capacity(rules.len());

        // Stage 1: pre-tax discounts off the gross amount
        let mut pre_tax_discount = Decimal::ZERO;
        for rule in &rules {
            match rule.stage() {
                Some(RuleStage::PreTax) => {
                    pre_tax_discount =
                        pre_tax_discount.saturating_add(pre_tax_contribution(&rule.kind, gross));
                    applied_rules.push(rule.name.clone());
                }
                Some(RuleStage::PostTax) => applied_rules.push(rule.name.clone()),
                None => {
                    warn!(rule = %rule.name, "skipping promotion of unrecognized kind");
                    anomalies.push(PricingAnomaly::UnrecognizedRule {
                        name: rule.name.clone(),
                    });
                }
            }
        }

        // Stage 2: post-discount amount, never negative
        let mut after_pre_tax = gross - pre_tax_discount;
        if after_pre_tax < Decimal::ZERO {
            warn!(
                %gross,
                %pre_tax_discount,
                "pre-tax discounts exceed gross amount, clamping to zero"
            );
            anomalies.push(PricingAnomaly::DiscountExceedsGross { pre_tax_discount });
            after_pre_tax = Decimal::ZERO;
        }

        // Stage 3: rewards tiered on the post-discount amount
        let mut voucher = Decimal::ZERO;
        let mut points = Decimal::ZERO;
        for rule in &rules {
            match &rule.kind {
                RuleKind::TieredVoucher { tiers } => voucher = tier_payout(tiers, after_pre_tax),
                RuleKind::TieredPoints { tiers } => points = tier_payout(tiers, after_pre_tax),
                _ => {}
            }
        }

        // Stage 4 and 5: refund on the post-discount amount
        let tax_refund = self.schedule.lookup(after_pre_tax);
        let after_tax = after_pre_tax - tax_refund;

        // Stage 6: effective net cost
        let final_payment = after_tax - voucher - points;

        debug!(
            %gross,
            %pre_tax_discount,
            %tax_refund,
            %voucher,
            %points,
            %final_payment,
            "priced basket"
        );

        PricingResult {
            gross,
            pre_tax_discount,
            after_pre_tax,
            tax_refund,
            after_tax,
            voucher,
            points,
            final_payment,
            applied_rules,
            anomalies,
        }
    }
}

/// Contribution of one pre-tax rule, always based on the gross amount
fn pre_tax_contribution(kind: &RuleKind, gross: Decimal) -> Decimal {
    match kind {
        RuleKind::PercentOfGross { rate } => gross * rate,
        RuleKind::FixedAboveThreshold { threshold, amount } => {
            if gross >= *threshold {
                *amount
            } else {
                Decimal::ZERO
            }
        }
        RuleKind::CappedPercentAboveThreshold {
            threshold,
            rate,
            cap,
        } => {
            if gross >= *threshold {
                (gross * rate).min(*cap)
            } else {
                Decimal::ZERO
            }
        }
        RuleKind::TieredCut { tiers } => tier_payout(tiers, gross),
        RuleKind::TieredVoucher { .. } | RuleKind::TieredPoints { .. } | RuleKind::Unrecognized => {
            Decimal::ZERO
        }
    }
}

fn tier_payout(tiers: &[Tier], amount: Decimal) -> Decimal {
    select_tier(tiers, amount).map_or(Decimal::ZERO, |tier| tier.amount)
}
