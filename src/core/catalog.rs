//! Discount catalog
//!
//! Immutable mapping from store name to that store's promotions. The catalog is
//! versioned reference data: it is decoded once at startup from JSON and only
//! read afterwards, so it can be shared between threads without locking.

use crate::core::traits::CatalogSource;
use crate::types::{DiscountRule, PricingError, RuleKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One store's catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorePromotions {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Promotions in the order they are offered to the shopper
    #[serde(default, alias = "options")]
    pub rules: Vec<DiscountRule>,
}

impl StorePromotions {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        rules: Vec<DiscountRule>,
    ) -> Self {
        StorePromotions {
            name: name.into(),
            description: description.into(),
            rules,
        }
    }

    /// Find a promotion by its display name
    pub fn rule(&self, name: &str) -> Option<&DiscountRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }
}

/// On-disk catalog layout
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    version: Option<String>,
    stores: Vec<StorePromotions>,
}

/// Read-only promotion catalog keyed by store name
#[derive(Debug, Clone)]
pub struct DiscountCatalog {
    version: Option<String>,
    stores: Vec<StorePromotions>,
    index: HashMap<String, usize>,
}

impl DiscountCatalog {
    /// Build a catalog from store entries
    ///
    /// Tiers of every tiered rule are sorted into ascending order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogFormat` if a store name appears twice, if a store lists
    /// two promotions under the same name (selection is by name, so duplicates
    /// would be ambiguous), or if a rule carries a negative amount, threshold or
    /// cap, or a rate outside 0 to 1.
    pub fn new(
        version: Option<String>,
        mut stores: Vec<StorePromotions>,
    ) -> Result<Self, PricingError> {
        let mut index = HashMap::with_capacity(stores.len());

        for (position, store) in stores.iter_mut().enumerate() {
            if index.insert(store.name.clone(), position).is_some() {
                return Err(PricingError::catalog_format(format!(
                    "duplicate store '{}'",
                    store.name
                )));
            }

            let mut seen = HashSet::with_capacity(store.rules.len());
            for rule in store.rules.iter_mut() {
                if !seen.insert(rule.name.clone()) {
                    return Err(PricingError::catalog_format(format!(
                        "store '{}' lists promotion '{}' twice",
                        store.name, rule.name
                    )));
                }
                check_rule(&store.name, rule)?;
                rule.kind.normalize();
            }
        }

        Ok(DiscountCatalog {
            version,
            stores,
            index,
        })
    }

    /// Decode a catalog from its JSON document form
    ///
    /// # Errors
    ///
    /// Returns `CatalogFormat` for malformed JSON or an inconsistent catalog.
    pub fn from_json(json: &str) -> Result<Self, PricingError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::new(document.version, document.stores)
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// All store entries, in catalog order
    pub fn stores(&self) -> &[StorePromotions] {
        &self.stores
    }

    /// Look up a store's full entry
    ///
    /// # Errors
    ///
    /// Returns `StoreNotFound` when the store is not in the catalog.
    pub fn store(&self, name: &str) -> Result<&StorePromotions, PricingError> {
        self.index
            .get(name)
            .map(|&position| &self.stores[position])
            .ok_or_else(|| PricingError::store_not_found(name))
    }
}

/// Range checks on the amounts and rates of one rule
fn check_rule(store: &str, rule: &DiscountRule) -> Result<(), PricingError> {
    let invalid = |field: &str, value: Decimal| {
        PricingError::catalog_format(format!(
            "store '{}' promotion '{}' has invalid {} {}",
            store, rule.name, field, value
        ))
    };
    let non_negative = |field: &str, value: Decimal| {
        if value < Decimal::ZERO {
            Err(invalid(field, value))
        } else {
            Ok(())
        }
    };
    let rate_in_range = |value: Decimal| {
        if value < Decimal::ZERO || value > Decimal::ONE {
            Err(invalid("rate", value))
        } else {
            Ok(())
        }
    };

    match &rule.kind {
        RuleKind::PercentOfGross { rate } => rate_in_range(*rate),
        RuleKind::FixedAboveThreshold { threshold, amount } => {
            non_negative("threshold", *threshold)?;
            non_negative("amount", *amount)
        }
        RuleKind::CappedPercentAboveThreshold {
            threshold,
            rate,
            cap,
        } => {
            non_negative("threshold", *threshold)?;
            rate_in_range(*rate)?;
            non_negative("cap", *cap)
        }
        RuleKind::TieredCut { tiers }
        | RuleKind::TieredVoucher { tiers }
        | RuleKind::TieredPoints { tiers } => tiers.iter().try_for_each(|tier| {
            non_negative("tier threshold", tier.threshold)?;
            non_negative("tier amount", tier.amount)
        }),
        RuleKind::Unrecognized => Ok(()),
    }
}

impl CatalogSource for DiscountCatalog {
    fn list_stores(&self) -> Vec<&str> {
        self.stores.iter().map(|store| store.name.as_str()).collect()
    }

    fn rules_for(&self, store: &str) -> Result<&[DiscountRule], PricingError> {
        self.store(store).map(|entry| entry.rules.as_slice())
    }
}

/// Resolve a shopper's selected promotion names against a store's rules
///
/// The returned rules keep the selection order, which is the order the
/// pipeline evaluates them in.
///
/// # Errors
///
/// - `StoreNotFound` if the store is unknown
/// - `DiscountNotFound` if a selected name is not offered by the store
pub fn select_rules<'c, C, S>(
    catalog: &'c C,
    store: &str,
    selected: &[S],
) -> Result<Vec<&'c DiscountRule>, PricingError>
where
    C: CatalogSource + ?Sized,
    S: AsRef<str>,
{
    let rules = catalog.rules_for(store)?;

    selected
        .iter()
        .map(|name| {
            let name = name.as_ref();
            rules
                .iter()
                .find(|rule| rule.name == name)
                .ok_or_else(|| PricingError::discount_not_found(store, name))
        })
        .collect()
}
