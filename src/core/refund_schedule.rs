//! Tax refund schedule
//!
//! The government refund is a step function of the spend: each bracket of the
//! schedule maps every amount inside it to one fixed refund. Amounts below the
//! first bracket (the eligibility floor) get nothing.
//!
//! Two table shapes exist in the wild: a progressive list of single ascending
//! thresholds, and explicit `[lower, upper]` ranges. Both are normalized into
//! the same contiguous range representation here, and what happens above a
//! closed top range is an explicit [`RefundOverflow`] policy.

use crate::types::PricingError;
use clap::ValueEnum;
use rust_decimal::Decimal;

/// One refund bracket, `lower..=upper` in whole won
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefundBracket {
    pub lower: Decimal,

    /// Inclusive upper bound, `None` for an open-ended top bracket
    pub upper: Option<Decimal>,

    pub refund: Decimal,
}

impl RefundBracket {
    pub fn new(lower: Decimal, upper: Option<Decimal>, refund: Decimal) -> Self {
        RefundBracket {
            lower,
            upper,
            refund,
        }
    }
}

/// Refund policy for amounts beyond a closed top bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RefundOverflow {
    /// Keep paying the top bracket's refund
    #[default]
    #[value(name = "clamp")]
    ClampToLast,

    /// Pay nothing once the table is exceeded
    #[value(name = "zero")]
    Zero,
}

/// Validated, immutable refund table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxRefundSchedule {
    brackets: Vec<RefundBracket>,
    overflow: RefundOverflow,
}

impl TaxRefundSchedule {
    /// Build a schedule from explicit ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidSchedule` if:
    /// - a bound or refund is negative
    /// - a bracket's upper bound is below its lower bound
    /// - brackets are not contiguous (`next.lower == upper + 1`)
    /// - any bracket other than the last one is open-ended
    pub fn new(
        brackets: Vec<RefundBracket>,
        overflow: RefundOverflow,
    ) -> Result<Self, PricingError> {
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.lower.is_sign_negative() || bracket.refund.is_sign_negative() {
                return Err(PricingError::invalid_schedule(format!(
                    "negative value in bracket starting at {}",
                    bracket.lower
                )));
            }

            if let Some(upper) = bracket.upper {
                if upper < bracket.lower {
                    return Err(PricingError::invalid_schedule(format!(
                        "bracket {}..={} is inverted",
                        bracket.lower, upper
                    )));
                }
            }

            let Some(next) = brackets.get(index + 1) else {
                continue;
            };

            match bracket.upper {
                None => {
                    return Err(PricingError::invalid_schedule(format!(
                        "open bracket at {} is not the last one",
                        bracket.lower
                    )))
                }
                Some(upper) if next.lower != upper + Decimal::ONE => {
                    return Err(PricingError::invalid_schedule(format!(
                        "bracket ending at {} is followed by {}, ranges must be contiguous",
                        upper, next.lower
                    )))
                }
                Some(_) => {}
            }
        }

        Ok(TaxRefundSchedule { brackets, overflow })
    }

    /// Build a schedule from progressive `(threshold, refund)` pairs
    ///
    /// Each threshold opens a bracket that runs up to the next threshold minus
    /// one won; the last threshold opens an unbounded bracket.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSchedule` if thresholds are not strictly ascending or a
    /// value is negative.
    pub fn from_thresholds(
        thresholds: &[(Decimal, Decimal)],
        overflow: RefundOverflow,
    ) -> Result<Self, PricingError> {
        let mut brackets = Vec::with_capacity(thresholds.len());

        for (index, &(lower, refund)) in thresholds.iter().enumerate() {
            let upper = match thresholds.get(index + 1) {
                Some(&(next, _)) if next <= lower => {
                    return Err(PricingError::invalid_schedule(format!(
                        "threshold {} does not ascend past {}",
                        next, lower
                    )))
                }
                Some(&(next, _)) => Some(next - Decimal::ONE),
                None => None,
            };
            brackets.push(RefundBracket::new(lower, upper, refund));
        }

        Self::new(brackets, overflow)
    }

    /// Look up the refund for a spend amount
    ///
    /// Never fails: amounts below the eligibility floor, and amounts above a
    /// closed table under [`RefundOverflow::Zero`], yield zero.
    pub fn lookup(&self, amount: Decimal) -> Decimal {
        let reached = self
            .brackets
            .partition_point(|bracket| bracket.lower <= amount);
        if reached == 0 {
            return Decimal::ZERO;
        }

        let bracket = &self.brackets[reached - 1];
        let is_top = reached == self.brackets.len();

        match bracket.upper {
            Some(upper) if is_top && amount >= upper + Decimal::ONE => match self.overflow {
                RefundOverflow::ClampToLast => bracket.refund,
                RefundOverflow::Zero => Decimal::ZERO,
            },
            _ => bracket.refund,
        }
    }

    /// Minimum spend that earns any refund
    pub fn eligibility_floor(&self) -> Option<Decimal> {
        self.brackets.first().map(|bracket| bracket.lower)
    }

    pub fn brackets(&self) -> &[RefundBracket] {
        &self.brackets
    }

    pub fn overflow(&self) -> RefundOverflow {
        self.overflow
    }
}
