use crate::core::DiscountCatalog;
use crate::types::{DiscountRule, PricingError, RuleStage};
use std::io::Write;

fn stage_label(rule: &DiscountRule) -> &'static str {
    match rule.stage() {
        Some(RuleStage::PreTax) => "pre-tax",
        Some(RuleStage::PostTax) => "post-tax",
        None => "unrecognized",
    }
}

/// Print every store with its promotions, the way a shopper picks them
pub fn write_store_listing(
    catalog: &DiscountCatalog,
    output: &mut dyn Write,
) -> Result<(), PricingError> {
    if let Some(version) = catalog.version() {
        writeln!(output, "# catalog {}", version)?;
    }

    for store in catalog.stores() {
        if store.description.is_empty() {
            writeln!(output, "{}", store.name)?;
        } else {
            writeln!(output, "{} - {}", store.name, store.description)?;
        }

        for rule in &store.rules {
            let once = if rule.once_only { ", once only" } else { "" };
            write!(output, "  {} [{}{}]", rule.name, stage_label(rule), once)?;
            match &rule.terms {
                Some(terms) => writeln!(output, " {}", terms)?,
                None => writeln!(output)?,
            }
        }
    }

    Ok(())
}
