//! CSV format handling for quote requests and priced output
//!
//! This module centralizes all CSV format concerns, providing:
//! - QuoteCsvRecord structure for deserialization
//! - Conversion from CSV records to domain types
//! - Priced quote output serialization
//!
//! All functions are pure (no I/O beyond the given writer) for easy testing.
//!
//! Amounts are priced exactly and only rounded to whole won when written. Each
//! column is rounded on its own, so with fractional input a row need not add
//! up: a gross of 12345.5 with a 5% cut prints `12346,617,11728`.

use crate::types::{PricingError, Quote, QuoteId, QuoteRecord};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Separator between promotion names in the `discounts` column
pub const DISCOUNT_SEPARATOR: &str = "|";

/// Output column order
pub const OUTPUT_HEADER: [&str; 14] = [
    "id",
    "store",
    "gross",
    "pre_tax_discount",
    "after_pre_tax",
    "tax_refund",
    "after_tax",
    "voucher",
    "points",
    "final_payment",
    "final_cny",
    "domestic_ratio",
    "anomalies",
    "applied",
];

/// Raw quote row as read from CSV
///
/// Amounts stay strings here so malformed values can be reported with the
/// quote ID they belong to.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct QuoteCsvRecord {
    pub id: QuoteId,
    pub store: String,
    pub gross: String,
    pub discounts: Option<String>,
    pub domestic_cny: Option<String>,
}

/// Convert a raw CSV row into a quote request
///
/// # Errors
///
/// Returns `InvalidAmount` if `gross` is missing, malformed or negative, or if
/// `domestic_cny` is present but malformed.
pub fn convert_csv_record(csv_record: QuoteCsvRecord) -> Result<QuoteRecord, PricingError> {
    let gross = parse_amount(&csv_record.gross, csv_record.id)?;

    let domestic_cny = match csv_record.domestic_cny.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse_amount(raw, csv_record.id)?),
        _ => None,
    };

    let discounts = csv_record
        .discounts
        .as_deref()
        .unwrap_or_default()
        .split(DISCOUNT_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    Ok(QuoteRecord {
        id: csv_record.id,
        store: csv_record.store.trim().to_string(),
        gross,
        discounts,
        domestic_cny,
    })
}

fn parse_amount(raw: &str, quote: QuoteId) -> Result<Decimal, PricingError> {
    let trimmed = raw.trim();
    match Decimal::from_str(trimmed) {
        Ok(amount) if !amount.is_sign_negative() => Ok(amount),
        _ => Err(PricingError::invalid_amount(raw, quote)),
    }
}

/// Whole-won rendering, midpoint away from zero
fn won(amount: Decimal) -> String {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

fn optional(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Write priced quotes as CSV, sorted by quote ID
///
/// Won columns are rounded independently from the exact amounts.
pub fn write_quotes_csv(quotes: &[Quote], output: &mut dyn Write) -> Result<(), PricingError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);
    writer.write_record(OUTPUT_HEADER)?;

    // Sort quotes by ID for deterministic output
    let mut sorted: Vec<&Quote> = quotes.iter().collect();
    sorted.sort_by_key(|quote| quote.id);

    for quote in sorted {
        let pricing = &quote.pricing;
        let anomalies: Vec<&str> = pricing.anomalies.iter().map(|a| a.code()).collect();

        writer.write_record(&[
            quote.id.to_string(),
            quote.store.clone(),
            won(pricing.gross),
            won(pricing.pre_tax_discount),
            won(pricing.after_pre_tax),
            won(pricing.tax_refund),
            won(pricing.after_tax),
            won(pricing.voucher),
            won(pricing.points),
            won(pricing.final_payment),
            optional(quote.final_cny),
            optional(quote.domestic_ratio),
            anomalies.join(";"),
            pricing.applied_rules.join(DISCOUNT_SEPARATOR),
        ])?;
    }

    writer.flush()?;

    Ok(())
}
