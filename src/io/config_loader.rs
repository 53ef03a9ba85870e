//! Loading of reference data: the discount catalog and the refund schedule
//!
//! Both files ship with the crate (`data/`) and are compiled in as the
//! defaults. Operators can point the CLI at their own copies when a store
//! changes its promotions or the refund table is revised.

use crate::core::{DiscountCatalog, RefundBracket, RefundOverflow, TaxRefundSchedule};
use crate::types::PricingError;
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::str::FromStr;

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");
const BUILTIN_REFUND_SCHEDULE: &str = include_str!("../../data/refund_schedule.csv");

/// One row of a refund schedule CSV
#[derive(Debug, Deserialize)]
struct ScheduleRow {
    lower: String,
    upper: Option<String>,
    refund: String,
}

fn open_error(path: &Path, error: std::io::Error) -> PricingError {
    match error.kind() {
        ErrorKind::NotFound => PricingError::file_not_found(&path.display().to_string()),
        _ => PricingError::from(error),
    }
}

/// Read a catalog JSON file
pub fn read_catalog(path: &Path) -> Result<DiscountCatalog, PricingError> {
    let json = fs::read_to_string(path).map_err(|e| open_error(path, e))?;
    DiscountCatalog::from_json(&json)
}

/// The catalog bundled with the crate
pub fn builtin_catalog() -> Result<DiscountCatalog, PricingError> {
    DiscountCatalog::from_json(BUILTIN_CATALOG)
}

/// Parse a refund schedule from `lower,upper,refund` CSV rows
///
/// An empty `upper` marks the open-ended top bracket.
///
/// # Errors
///
/// - `ParseError` for rows that are not three numbers
/// - `InvalidSchedule` when the ranges do not form a valid schedule
pub fn read_refund_schedule<R: Read>(
    reader: R,
    overflow: RefundOverflow,
) -> Result<TaxRefundSchedule, PricingError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut brackets = Vec::new();

    for (index, row) in reader.deserialize::<ScheduleRow>().enumerate() {
        let row = row?;
        // Header is line 1
        let line = index as u64 + 2;

        let upper = match row.upper.as_deref() {
            Some(raw) if !raw.is_empty() => Some(parse_won(raw, line)?),
            _ => None,
        };
        brackets.push(RefundBracket::new(
            parse_won(&row.lower, line)?,
            upper,
            parse_won(&row.refund, line)?,
        ));
    }

    if brackets.is_empty() {
        return Err(PricingError::invalid_schedule("schedule has no brackets"));
    }

    TaxRefundSchedule::new(brackets, overflow)
}

fn parse_won(raw: &str, line: u64) -> Result<Decimal, PricingError> {
    Decimal::from_str(raw).map_err(|e| PricingError::ParseError {
        line: Some(line),
        message: format!("invalid amount '{}': {}", raw, e),
    })
}

/// Read a refund schedule CSV file
pub fn read_refund_schedule_file(
    path: &Path,
    overflow: RefundOverflow,
) -> Result<TaxRefundSchedule, PricingError> {
    let file = fs::File::open(path).map_err(|e| open_error(path, e))?;
    read_refund_schedule(file, overflow)
}

/// The refund schedule bundled with the crate
pub fn builtin_refund_schedule(
    overflow: RefundOverflow,
) -> Result<TaxRefundSchedule, PricingError> {
    read_refund_schedule(BUILTIN_REFUND_SCHEDULE.as_bytes(), overflow)
}
