//! Won to yuan display conversion
//!
//! Rates are quoted as yuan per 10,000 won, either as a bare number or inside
//! the notice string published by the rate source, for example
//! `"2025年01月01日 10:00，10000韩元=50.34人民币"`. A rate that cannot be parsed is
//! treated as unavailable: callers render the won figure only.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

const NOTICE_MARKER: &str = "10000韩元=";
const WON_PER_QUOTE: i64 = 10_000;

/// Yuan received for 10,000 won
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRate {
    yuan_per_10000_won: Decimal,
}

impl ExchangeRate {
    /// Create a rate, rejecting zero and negative values
    pub fn new(yuan_per_10000_won: Decimal) -> Option<Self> {
        if yuan_per_10000_won > Decimal::ZERO {
            Some(ExchangeRate { yuan_per_10000_won })
        } else {
            None
        }
    }

    /// Parse a bare number or a rate notice string
    ///
    /// Returns `None` for anything else; a missing rate is a normal state.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(value) = Decimal::from_str(raw) {
            return Self::new(value);
        }

        let (_, after) = raw.split_once(NOTICE_MARKER)?;
        let number: String = after
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        Decimal::from_str(&number).ok().and_then(Self::new)
    }

    pub fn yuan_per_10000_won(&self) -> Decimal {
        self.yuan_per_10000_won
    }

    /// Convert a won amount to whole yuan, truncating toward zero
    ///
    /// `None` when the figure does not fit, same as an unavailable rate.
    pub fn to_yuan(&self, won: Decimal) -> Option<i64> {
        won.checked_div(Decimal::from(WON_PER_QUOTE))?
            .checked_mul(self.yuan_per_10000_won)?
            .trunc()
            .to_i64()
    }
}

/// Final yuan cost as a whole percentage of a domestic reference price
///
/// `None` when the reference price is missing or not positive, or when the
/// percentage is too large to represent.
pub fn domestic_ratio(final_cny: i64, domestic_cny: Option<Decimal>) -> Option<i64> {
    let domestic = domestic_cny.filter(|price| *price > Decimal::ZERO)?;
    Decimal::from(final_cny)
        .checked_mul(Decimal::ONE_HUNDRED)?
        .checked_div(domestic)?
        .trunc()
        .to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::bare_number("50.34", Some(Decimal::new(5034, 2)))]
    #[case::padded_number("  48  ", Some(Decimal::from(48)))]
    #[case::notice("2025年01月01日 10:00，10000韩元=50.34人民币", Some(Decimal::new(5034, 2)))]
    #[case::notice_integer_rate("10000韩元=51人民币", Some(Decimal::from(51)))]
    #[case::empty("", None)]
    #[case::garbage("rate unavailable", None)]
    #[case::notice_without_number("10000韩元=人民币", None)]
    #[case::zero("0", None)]
    #[case::negative("-3.5", None)]
    fn test_parse(#[case] raw: &str, #[case] expected: Option<Decimal>) {
        let parsed = ExchangeRate::parse(raw).map(|rate| rate.yuan_per_10000_won());
        assert_eq!(parsed, expected);
    }

    #[rstest]
    #[case::exact(882_000, "50", 4_410)]
    #[case::truncates(882_000, "50.34", 4_439)]
    #[case::small_amount(9_999, "50", 49)]
    #[case::zero(0, "50", 0)]
    fn test_to_yuan(#[case] won: i64, #[case] rate: &str, #[case] expected: i64) {
        let rate = ExchangeRate::parse(rate).unwrap();
        assert_eq!(rate.to_yuan(Decimal::from(won)), Some(expected));
    }

    #[rstest]
    #[case::product_overflows("9000000000000000000000000000", 882_000)]
    #[case::beyond_i64("9000000000000000000000000000", 1)]
    fn test_to_yuan_out_of_range_is_unavailable(#[case] rate: &str, #[case] won: i64) {
        let rate = ExchangeRate::parse(rate).unwrap();
        assert_eq!(rate.to_yuan(Decimal::from(won)), None);
    }

    #[rstest]
    #[case::cheaper(4_410, Some(Decimal::from(6_000)), Some(73))]
    #[case::dearer(7_000, Some(Decimal::from(6_000)), Some(116))]
    #[case::missing(4_410, None, None)]
    #[case::zero_reference(4_410, Some(Decimal::ZERO), None)]
    #[case::quotient_overflows(4_410, Some(Decimal::new(1, 25)), None)]
    #[case::beyond_i64(4_410, Some(Decimal::new(1, 20)), None)]
    fn test_domestic_ratio(
        #[case] final_cny: i64,
        #[case] domestic: Option<Decimal>,
        #[case] expected: Option<i64>,
    ) {
        assert_eq!(domestic_ratio(final_cny, domestic), expected);
    }
}
